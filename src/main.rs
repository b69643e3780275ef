use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{ArgGroup, Args, Parser, Subcommand};
use gradebook::repository::{InMemoryRepository, Repository};
use gradebook::{
    config, generate_report, import, performance_summary, report, seed, Enrolled, GraduateStudent,
    validate_profile, IdSequence, Profile, Student, Thesis, UndergraduateStudent,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gradebook")]
#[command(about = "Grade ledgers, GPA and academic standing for students", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the sample cohort and print each student's standing
    Demo,
    /// Import a record from CSV and write a report
    #[command(group(
        ArgGroup::new("output")
            .args(["out", "json"])
            .multiple(false)
    ))]
    Report {
        #[command(flatten)]
        student: StudentArgs,
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the report snapshot as JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
    /// Import a record from CSV and print standing and recommendations
    Summary {
        #[command(flatten)]
        student: StudentArgs,
        #[arg(long)]
        csv: PathBuf,
    },
}

#[derive(Args)]
#[command(group(
    ArgGroup::new("kind")
        .args(["graduate", "year"])
        .multiple(false)
))]
struct StudentArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value_t = 20)]
    age: u32,
    #[arg(long)]
    student_id: String,
    #[arg(long)]
    major: String,
    /// Grade on the graduate scale
    #[arg(long)]
    graduate: bool,
    #[arg(long, default_value = "Untitled")]
    thesis: String,
    #[arg(long, default_value = "TBD")]
    advisor: String,
    #[arg(long, default_value = "TBD")]
    research_area: String,
    /// Year of study (1-4) for an undergraduate
    #[arg(long)]
    year: Option<u8>,
}

impl StudentArgs {
    fn profile(&self) -> Profile {
        Profile::new(
            &self.name,
            self.age,
            &self.email,
            &self.student_id,
            &self.major,
        )
    }

    fn build(&self, ids: &IdSequence) -> anyhow::Result<Box<dyn Enrolled>> {
        let profile = self.profile();

        let student: Box<dyn Enrolled> = if self.graduate {
            let thesis = Thesis::new(&self.thesis, &self.advisor, &self.research_area);
            Box::new(GraduateStudent::new(ids, &profile, thesis)?)
        } else if let Some(year) = self.year {
            Box::new(UndergraduateStudent::new(ids, &profile, year)?)
        } else {
            Box::new(Student::new(ids, &profile)?)
        };
        Ok(student)
    }
}

fn load(args: &StudentArgs, csv: &Path) -> anyhow::Result<Box<dyn Enrolled>> {
    let problems = validate_profile(&args.profile(), args.year);
    if !problems.is_empty() {
        let messages: Vec<String> = problems.iter().map(ToString::to_string).collect();
        bail!("invalid student details: {}", messages.join("; "));
    }

    let ids = IdSequence::new();
    let mut student = args.build(&ids).context("invalid student details")?;
    let summary = import::load_record(csv, student.student_mut())?;
    if summary.duplicate_courses > 0 {
        tracing::warn!(
            duplicates = summary.duplicate_courses,
            "{} listed some courses more than once",
            csv.display()
        );
    }
    Ok(student)
}

async fn run_demo() -> anyhow::Result<()> {
    let ids = IdSequence::new();
    let cohort = seed::sample_cohort(&ids)?;

    println!("Processing students:");
    for (index, member) in cohort.members().iter().enumerate() {
        let record = member.student().record();
        println!("{}. {}", index + 1, member.info());
        println!("   Role: {}", member.role());
        println!("   GPA: {}", member.gpa());
        println!("   Credits: {}", record.total_credits());
        for detail in member.details() {
            println!("   {detail}");
        }
        let summary = performance_summary(record);
        println!(
            "   Standing: {} ({})",
            summary.standing.as_str(),
            summary.recommendations.join("; ")
        );
    }

    println!("{}", cohort.graduate.defend_thesis());
    println!("{}", cohort.student.grade_report());

    let repository: InMemoryRepository<Student> = InMemoryRepository::new();
    repository.save(cohort.student.clone()).await;
    println!(
        "Total persons created: {}; {} stored in repository.",
        ids.issued(),
        repository.len().await
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gradebook=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo => run_demo().await?,
        Commands::Report {
            student,
            csv,
            out,
            json,
        } => {
            let loaded = load(&student, &csv)?;
            let snapshot = generate_report(&*loaded);

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                let summary = performance_summary(loaded.student().record());
                let text = report::render_markdown(&snapshot, &summary);
                let out = config::resolve_out(out.unwrap_or_else(|| PathBuf::from("report.md")));
                std::fs::write(&out, text)
                    .with_context(|| format!("failed to write {}", out.display()))?;
                println!("Report written to {}.", out.display());
            }
        }
        Commands::Summary { student, csv } => {
            let loaded = load(&student, &csv)?;
            let summary = performance_summary(loaded.student().record());
            println!(
                "{}: GPA {:.2}, {} credits, standing {}",
                loaded.info(),
                summary.gpa,
                summary.credits,
                summary.standing.as_str()
            );
            for recommendation in summary.recommendations.iter() {
                println!("- {recommendation}");
            }
        }
    }

    Ok(())
}

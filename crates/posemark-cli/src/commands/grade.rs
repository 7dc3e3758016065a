use anyhow::Result;
use clap::{Args, ValueEnum};
use posemark_core::grades::{grade_cell, GradeScale};

#[derive(Clone, Copy, ValueEnum)]
pub enum ScaleArg {
    Standard,
    Ap,
}

impl From<ScaleArg> for GradeScale {
    fn from(arg: ScaleArg) -> Self {
        match arg {
            ScaleArg::Standard => GradeScale::Standard,
            ScaleArg::Ap => GradeScale::Ap,
        }
    }
}

#[derive(Args)]
pub struct GradeArgs {
    /// Scores as percentages (87.3) or fractions (0.873)
    #[arg(required = true, allow_hyphen_values = true)]
    pub values: Vec<String>,

    /// Grading scale
    #[arg(long, value_enum, default_value = "standard")]
    pub scale: ScaleArg,
}

pub fn run(args: &GradeArgs) -> Result<()> {
    let scale = GradeScale::from(args.scale);
    for value in &args.values {
        println!("{:>10}  {}", value, grade_cell(value, scale));
    }
    Ok(())
}

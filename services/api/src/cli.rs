use crate::demo::{
    run_demo, run_loan_check, run_loan_table, run_payroll_summary, DemoArgs, LoanCheckArgs,
    LoanTableArgs, PayrollSummaryArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use smart_hr::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Smart HR",
    about = "Run the Smart HR finance service or its offline calculators",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Salary advance calculator
    Loan {
        #[command(subcommand)]
        command: LoanCommand,
    },
    /// Payroll sheet utilities
    Payroll {
        #[command(subcommand)]
        command: PayrollCommand,
    },
    /// Walk through the loan desk, payroll, journal and assistant flows
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum LoanCommand {
    /// Check whether an amount is affordable for a salary and category
    Check(LoanCheckArgs),
    /// Print the installment schedule
    Table(LoanTableArgs),
}

#[derive(Subcommand, Debug)]
enum PayrollCommand {
    /// Compute payslips and sheet totals from a CSV export
    Summary(PayrollSummaryArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Loan {
            command: LoanCommand::Check(args),
        } => run_loan_check(args),
        Command::Loan {
            command: LoanCommand::Table(args),
        } => run_loan_table(args),
        Command::Payroll {
            command: PayrollCommand::Summary(args),
        } => run_payroll_summary(args),
        Command::Demo(args) => run_demo(args),
    }
}

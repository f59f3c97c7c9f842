use crate::infra::{
    evaluator_from_config, parse_amount, parse_category, parse_locale, InMemoryLoanRepository,
};
use chrono::Local;
use clap::Args;
use smart_hr::assistant::{
    Assistant, AssistantAction, AssistantError, AssistantReply, ScriptedAssistant,
};
use smart_hr::config::AppConfig;
use smart_hr::error::AppError;
use smart_hr::finance::accounting::{JournalEntry, JournalLine};
use smart_hr::finance::cashier::{Cart, Customer, PaymentMethod, PricingTier, Product};
use smart_hr::finance::loans::{
    ApplicantCategory, EligibilityEvaluator, LoanAmount, LoanApplicationRequest,
    LoanApplicationService,
};
use smart_hr::finance::payroll::{PayrollImporter, PayrollRecord, PayrollSummary};
use smart_hr::locale::{format_amount, Locale};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

const SAMPLE_SHEET: &str = "\
employee_id,employee_name,financial_number,month,grade,step,nominal_salary,allowance_certificate,allowance_family,allowance_risk,allowance_position,allowance_transport,allowance_other,deduction_tax,deduction_absence,deduction_loan,retirement,status
10203,Ahmed Kadhim Hassan,882910,{month},3,2,680000,100000,50000,200000,150000,30000,,12000,,50000,true,approved
10204,Sarah Jassim Mohammed,882911,{month},5,1,450000,50000,25000,,,30000,,5000,,,true,draft
10205,Hussein Ali Rida,990123,{month},9,4,210000,,75000,50000,,,150000,,,,false,draft
";

#[derive(Args, Debug)]
pub(crate) struct LoanCheckArgs {
    /// Requested principal in dinars (accepts 30000000, 30,000,000 or 30m)
    #[arg(long, value_parser = parse_amount)]
    pub(crate) amount: LoanAmount,
    /// Monthly salary in dinars; 0 means not provided
    #[arg(long, default_value_t = 0)]
    pub(crate) salary: u64,
    /// Applicant category (civilian, military, intelligence, social_welfare, poor_families)
    #[arg(long, value_parser = parse_category, default_value = "civilian")]
    pub(crate) category: ApplicantCategory,
    /// Message language (ar or en); defaults to APP_LOCALE
    #[arg(long, value_parser = parse_locale)]
    pub(crate) locale: Option<Locale>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct LoanTableArgs {
    /// Label language (ar or en); defaults to APP_LOCALE
    #[arg(long, value_parser = parse_locale)]
    pub(crate) locale: Option<Locale>,
}

#[derive(Args, Debug)]
pub(crate) struct PayrollSummaryArgs {
    /// CSV export of the payroll master sheet
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print every payslip, not only the sheet totals
    #[arg(long)]
    pub(crate) list_lines: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Demo language (ar or en); defaults to APP_LOCALE
    #[arg(long, value_parser = parse_locale)]
    pub(crate) locale: Option<Locale>,
    /// Skip the assistant portion of the demo.
    #[arg(long)]
    pub(crate) skip_assistant: bool,
}

fn load_config(locale: Option<Locale>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(locale) = locale {
        config.locale = locale;
        config.assistant.locale = locale;
    }
    Ok(config)
}

pub(crate) fn run_loan_check(args: LoanCheckArgs) -> Result<(), AppError> {
    let LoanCheckArgs {
        amount,
        salary,
        category,
        locale,
    } = args;

    let evaluator = evaluator_from_config(&load_config(locale)?);
    let result = evaluator.evaluate(amount, salary, category);

    println!(
        "Loan {} | salary {} | {}",
        amount,
        format_amount(salary),
        category.label(evaluator.locale())
    );
    println!("Monthly installment: {}", format_amount(result.installment));
    if !evaluator.table().contains(amount) {
        println!("Note: amount is not on the schedule; installment defaults to 0");
    }
    println!(
        "Result: {} - {}",
        if result.is_eligible { "ELIGIBLE" } else { "NOT ELIGIBLE" },
        result.message
    );

    Ok(())
}

pub(crate) fn run_loan_table(args: LoanTableArgs) -> Result<(), AppError> {
    let evaluator = evaluator_from_config(&load_config(args.locale)?);
    render_loan_table(&evaluator);
    Ok(())
}

pub(crate) fn run_payroll_summary(args: PayrollSummaryArgs) -> Result<(), AppError> {
    let records = PayrollImporter::from_path(&args.csv)?;
    println!("Payroll sheet: {}", args.csv.display());
    render_payroll(&records, args.list_lines)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        locale,
        skip_assistant,
    } = args;

    let config = load_config(locale)?;
    let evaluator = evaluator_from_config(&config);
    let locale = config.locale;

    println!("Smart HR finance demo (locale {})", locale.code());
    render_loan_table(&evaluator);

    println!("\nEligibility checks");
    let scenarios = [
        (LoanAmount(30_000_000), 1_000_000, ApplicantCategory::Civilian),
        (LoanAmount(50_000_000), 1_000_000, ApplicantCategory::Military),
        (LoanAmount(20_000_000), 0, ApplicantCategory::Intelligence),
        (LoanAmount(25_000_000), 2_000_000, ApplicantCategory::PoorFamilies),
        (LoanAmount(20_000_000), 2_000_000, ApplicantCategory::SocialWelfare),
    ];
    for (amount, salary, category) in scenarios {
        let result = evaluator.evaluate(amount, salary, category);
        println!(
            "- {} / salary {} / {}: {}",
            amount,
            format_amount(salary),
            category.label(locale),
            result.message
        );
    }

    println!("\nAdvance desk");
    let repository = Arc::new(InMemoryLoanRepository::default());
    let service = LoanApplicationService::new(repository, evaluator);

    let refused = LoanApplicationRequest {
        applicant_name: "Hussein Ali Rida".to_string(),
        employee_id: "10205".to_string(),
        amount: LoanAmount(20_000_000),
        salary: 210_000,
        category: ApplicantCategory::SocialWelfare,
    };
    match service.submit(refused) {
        Ok(record) => println!("- Unexpectedly accepted {}", record.id.0),
        Err(err) => println!("- Refused at intake: {}", err),
    }

    let accepted = LoanApplicationRequest {
        applicant_name: "Ahmed Kadhim Hassan".to_string(),
        employee_id: "10203".to_string(),
        amount: LoanAmount(15_000_000),
        salary: 1_080_000,
        category: ApplicantCategory::Civilian,
    };
    let record = match service.submit(accepted) {
        Ok(record) => record,
        Err(err) => {
            println!("- Submission failed: {}", err);
            return Ok(());
        }
    };
    println!(
        "- Received {} -> {} (installment {})",
        record.id.0,
        record.status.label(),
        format_amount(record.installment)
    );
    match service.decide(&record.id, true) {
        Ok(decided) => match serde_json::to_string_pretty(&decided.status_view()) {
            Ok(json) => println!("  Public status payload:\n{}", json),
            Err(err) => println!("  Public status payload unavailable: {}", err),
        },
        Err(err) => println!("  Decision failed: {}", err),
    }

    println!("\nPayroll sheet");
    let month = Local::now().format("%Y-%m").to_string();
    let sheet = SAMPLE_SHEET.replace("{month}", &month);
    let records = PayrollImporter::from_reader(Cursor::new(sheet))?;
    render_payroll(&records, true)?;

    println!("\nJournal entry");
    let mut entry = JournalEntry::new("JV-DEMO-001", "Salary advance disbursement")
        .with_line(JournalLine::debit("116", 15_000_000).with_cost_center("HR"))
        .with_line(JournalLine::credit("181", 15_000_000).with_cost_center("HR"));
    let totals = entry.post()?;
    println!(
        "- {} posted: debit {} / credit {}",
        entry.serial,
        format_amount(totals.debit),
        format_amount(totals.credit)
    );

    println!("\nCashier");
    run_cashier_demo()?;

    if skip_assistant {
        return Ok(());
    }

    println!("\nAssistant");
    let client = ScriptedAssistant::new([
        Ok("Here is the order draft.\n```json\n\
            {\"type\":\"ADMIN_ORDER\",\"data\":{\"title\":\"Annual leave\",\
            \"content\":\"Ahmed Kadhim Hassan is granted ten days of leave.\"}}\n```"
            .to_string()),
        Err(AssistantError::Unavailable("offline demo".to_string())),
    ]);
    let assistant = Assistant::new(client, config.assistant);

    render_reply(&assistant.ask("Draft an annual leave order for employee 10203"));
    render_reply(&assistant.ask("Summarise this month's payroll"));

    Ok(())
}

fn run_cashier_demo() -> Result<(), AppError> {
    let mut products = vec![
        Product {
            id: "1".to_string(),
            name: "iPhone 15 Pro Max 256".to_string(),
            barcode: "IP15PM".to_string(),
            price: 1_650_000,
            wholesale_price: Some(1_600_000),
            cost_price: Some(1_550_000),
            stock: 12,
        },
        Product {
            id: "2".to_string(),
            name: "Anker 20W charger".to_string(),
            barcode: "ANK20".to_string(),
            price: 25_000,
            wholesale_price: Some(18_000),
            cost_price: Some(12_000),
            stock: 150,
        },
    ];
    let mut account = Customer {
        id: "c1".to_string(),
        name: "Al-Noor Telecom".to_string(),
        balance: -1_500_000,
        credit_limit: 5_000_000,
    };

    let mut cart = Cart::new(PricingTier::Wholesale);
    cart.add_quantity(&products[0], 2)?;
    cart.add_quantity(&products[1], 10)?;
    cart.set_discount(30_000);
    let sale = cart.checkout(PaymentMethod::Credit, Some(&mut account), &mut products)?;
    println!(
        "- Credit sale to {}: total {} | profit {} | balance now {}",
        account.name,
        format_amount(sale.totals.total),
        sale.totals.profit,
        account.balance
    );

    cart.add_quantity(&products[0], 2)?;
    match cart.checkout(PaymentMethod::Credit, Some(&mut account), &mut products) {
        Ok(sale) => println!("- Unexpectedly settled {}", format_amount(sale.totals.total)),
        Err(err) => println!("- Second sale refused: {}", err),
    }
    Ok(())
}

fn render_loan_table(evaluator: &EligibilityEvaluator) {
    let locale = evaluator.locale();
    println!("Installment schedule");
    for entry in evaluator.table().entries() {
        println!(
            "- {} -> {} / month",
            entry.amount,
            format_amount(entry.installment)
        );
    }

    println!("Category caps");
    for category in ApplicantCategory::ALL {
        match category.principal_cap() {
            Some(cap) => println!("- {}: up to {}", category.label(locale), format_amount(cap)),
            None => println!("- {}: schedule maximum", category.label(locale)),
        }
    }
    println!(
        "Installment may not exceed {}% of the salary",
        evaluator.policy().max_deduction_pct
    );
}

fn render_payroll(records: &[PayrollRecord], list_lines: bool) -> Result<(), AppError> {
    if list_lines {
        for record in records {
            println!(
                "- {} ({}) grade {}/{}: earnings {} | deductions {} | net {}",
                record.line.employee_name,
                record.line.employee_id,
                record.line.grade,
                record.line.step,
                format_amount(record.total_earnings),
                format_amount(record.total_deductions),
                format_amount(record.net_salary)
            );
        }
    }

    let summary = PayrollSummary::from_records(records)?;
    println!(
        "Headcount {} | nominal {} | allowances {} | deductions {} | net {}",
        summary.headcount,
        format_amount(summary.total_nominal),
        format_amount(summary.total_allowances),
        format_amount(summary.total_deductions),
        format_amount(summary.total_net)
    );
    Ok(())
}

fn render_reply(reply: &AssistantReply) {
    println!("- {}", reply.text);
    match &reply.action {
        Some(AssistantAction::AdminOrder(order)) => {
            println!("  [admin order] {}: {}", order.title, order.content)
        }
        Some(AssistantAction::EmployeeCard(card)) => println!("  [employee card] {}", card.name),
        Some(AssistantAction::AnalysisChart(_)) => println!("  [analysis chart]"),
        Some(AssistantAction::Unknown { kind, .. }) => println!("  [unrendered widget '{}']", kind),
        None => {}
    }
}

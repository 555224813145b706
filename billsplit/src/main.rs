use billsplitlib::{
    error::{BillsplitError, Result},
    expense::ExpenseDraft,
    model::{Group, Shares},
    SplitPolicy,
};
use clap::Parser;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name="billsplit", version, about="Проверка разбиения расхода и сборка запроса")]
struct Cli {
    /// Черновик расхода в JSON (по умолчанию stdin)
    #[arg(short='i', long="input")]
    input: Option<String>,

    /// Выходной файл (по умолчанию stdout)
    #[arg(short='o', long="output")]
    output: Option<String>,

    /// Группа в JSON: состав участников и валюта
    #[arg(short='g', long="group")]
    group: Option<String>,

    /// Допуск сверки сумм, перекрывает BILLSPLIT_TOLERANCE
    #[arg(long="tolerance")]
    tolerance: Option<Decimal>,

    /// Вместо запроса вывести долю каждого участника
    #[arg(long="shares")]
    shares: bool,

    /// Форматированный JSON
    #[arg(long="pretty")]
    pretty: bool,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut policy = SplitPolicy::from_env()?;
    if let Some(t) = cli.tolerance {
        policy = policy.with_tolerance(t)?;
    }

    // reader
    let reader: Box<dyn io::Read> = match cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let draft: ExpenseDraft = serde_json::from_reader(BufReader::new(reader))?;

    let group: Option<Group> = match cli.group {
        Some(path) => Some(serde_json::from_reader(BufReader::new(File::open(path)?))?),
        None => None,
    };

    let request = draft.to_request(group.as_ref(), &policy).map_err(|e| {
        warn!("Expense rejected: {e}");
        BillsplitError::from(e)
    })?;
    info!(
        group_id = request.group_id,
        split_type = ?request.split_type,
        "Expense request built"
    );

    // writer
    let mut writer: Box<dyn Write> = match cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    let body = if cli.shares {
        serde_json::to_value(Shares(request.split.shares(request.amount)))?
    } else {
        serde_json::to_value(&request)?
    };
    if cli.pretty {
        serde_json::to_writer_pretty(&mut writer, &body)?;
    } else {
        serde_json::to_writer(&mut writer, &body)?;
    }
    writeln!(writer)?;

    writer.flush().map_err(BillsplitError::from)
}

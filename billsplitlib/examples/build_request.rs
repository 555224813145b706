use billsplitlib::{expense::ExpenseDraft, SplitPolicy};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: черновик расхода из stdin -> тело запроса в stdout
    let draft: ExpenseDraft = serde_json::from_reader(std::io::stdin())?;
    let request = draft.to_request(None, &SplitPolicy::default())?;
    serde_json::to_writer_pretty(std::io::stdout(), &request)?;
    Ok(())
}

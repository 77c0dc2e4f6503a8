//! Step result reporter: PASS, FAIL and SKIP lines plus a summary.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail(String),
    Skipped,
}

#[derive(Debug, Clone)]
pub struct Record {
    pub group: String,
    pub name: String,
    pub outcome: Outcome,
}

#[derive(Debug, Default)]
pub struct Reporter {
    records: Vec<Record>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, group: &str, name: &str, outcome: Outcome) {
        match &outcome {
            Outcome::Pass => println!("PASS  [{group}] {name}"),
            Outcome::Skipped => println!("SKIP  [{group}] {name}"),
            Outcome::Fail(reason) => {
                println!("FAIL  [{group}] {name}");
                println!("        {reason}");
            }
        }
        self.records.push(Record {
            group: group.to_string(),
            name: name.to_string(),
            outcome,
        });
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn passed(&self) -> usize {
        self.count(|o| *o == Outcome::Pass)
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Fail(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| *o == Outcome::Skipped)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn print_summary(&self) {
        println!();
        println!("────────────────────────────────────────────────────");
        println!(
            "Results: {} passed, {} failed, {} skipped",
            self.passed(),
            self.failed(),
            self.skipped()
        );
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

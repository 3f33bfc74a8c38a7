use crate::verbosity::Verbosity;
use crate::ReportFormatter;
use strata_enforce::{ContractSummary, ImportListing, LintReport};

const TITLE: &str = "Strata";
const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeadingLevel {
    One,
    Two,
    Three,
}

pub struct HumanFormatter {
    pub verbosity: Verbosity,
}

impl HumanFormatter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}

impl ReportFormatter for HumanFormatter {
    fn format_report(&self, report: &LintReport) -> String {
        if self.verbosity == Verbosity::Quiet && report.all_kept() {
            return String::new(); // Nothing to say
        }

        let mut out = String::new();
        heading(&mut out, TITLE, HeadingLevel::One);
        if self.verbosity == Verbosity::High {
            dependencies_section(&mut out, report);
        }
        contracts_section(&mut out, report);
        broken_contracts_section(&mut out, report);
        out
    }

    fn format_imports(&self, listing: &ImportListing) -> String {
        let mut out = String::new();
        heading(
            &mut out,
            &format!("Modules imported by {}", listing.module),
            HeadingLevel::Two,
        );
        for entry in &listing.imports {
            let importers: Vec<&str> = entry.importers.iter().map(|m| m.name()).collect();
            out.push_str(&format!(
                "{INDENT}- {} (imported by {})\n",
                entry.imported,
                importers.join(", ")
            ));
        }
        out
    }
}

fn heading(out: &mut String, text: &str, level: HeadingLevel) {
    let (ch, line_above) = match level {
        HeadingLevel::One => ('=', true),
        HeadingLevel::Two => ('-', true),
        HeadingLevel::Three => ('-', false),
    };
    let line: String = std::iter::repeat(ch).take(text.chars().count()).collect();
    if line_above {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(text);
    out.push('\n');
    out.push_str(&line);
    out.push_str("\n\n");
}

fn dependencies_section(out: &mut String, report: &LintReport) {
    heading(out, "Dependencies", HeadingLevel::Two);
    for entry in &report.dependencies {
        out.push_str(&format!("{} imports:\n", entry.module));
        if entry.imports.is_empty() {
            out.push_str("- (nothing)\n");
        }
        for imported in &entry.imports {
            out.push_str(&format!("- {imported}\n"));
        }
        out.push('\n');
    }
}

fn contracts_section(out: &mut String, report: &LintReport) {
    heading(out, "Contracts", HeadingLevel::Two);
    heading(
        out,
        &format!(
            "Analyzed {} files, {} dependencies.",
            report.module_count, report.dependency_count
        ),
        HeadingLevel::Three,
    );

    if report.contracts.is_empty() {
        out.push_str("No contracts found.\n");
    }
    let kept = report.contracts.iter().filter(|c| c.kept);
    let broken = report.contracts.iter().filter(|c| !c.kept);
    for contract in kept.chain(broken) {
        out.push_str(&one_liner(contract));
    }
    out.push('\n');

    out.push_str(&format!(
        "Contracts: {} kept, {} broken.\n\n",
        report.kept_count(),
        report.broken_count()
    ));
}

fn one_liner(contract: &ContractSummary) -> String {
    let whitelisted = match contract.whitelisted_paths {
        0 => String::new(),
        n => format!("({n} whitelisted paths) "),
    };
    let status = if contract.kept { "KEPT" } else { "BROKEN" };
    format!("{} {whitelisted}{status}\n", contract.name)
}

fn broken_contracts_section(out: &mut String, report: &LintReport) {
    if report.all_kept() {
        return;
    }
    heading(out, "Broken contracts", HeadingLevel::Two);

    for contract in report.contracts.iter().filter(|c| !c.kept) {
        heading(out, &contract.name, HeadingLevel::Three);
        for (index, dependency) in contract.illegal_dependencies.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} imports {}:\n\n",
                index + 1,
                dependency.importer(),
                dependency.imported()
            ));
            let last = dependency.len().saturating_sub(1);
            for (i, module) in dependency.path().iter().enumerate() {
                let arrow = if i < last { " <-" } else { "" };
                out.push_str(&format!("{INDENT}{module}{arrow}\n"));
            }
            out.push('\n');
        }
    }
}

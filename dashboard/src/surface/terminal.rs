//! Surface that prints every update to stdout.

use super::{CellId, Field, NoticeKind, UiSurface};
use colored::{ColoredString, Colorize};
use plagiarism::HighlightTier;
use scorer::{BuildSeverity, TestScoreRow};
use std::io::{self, BufRead, Write};

const BAR_WIDTH: u32 = 50;

/// Line-oriented [`UiSurface`] for the `labdash` binary.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    /// Skip interactive confirmation and answer yes.
    assume_yes: bool,
}

impl TerminalSurface {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    fn caption(field: &Field) -> Option<String> {
        match field {
            Field::LabHeadline => Some("Lab".into()),
            Field::TotalScore => Some("Total score".into()),
            Field::MossResult => Some("Moss".into()),
            Field::JplagResult => Some("JPlag".into()),
            Field::DuplResult => Some("Duplicates".into()),
            Field::LabSummary(lab) => Some(lab.clone()),
            // these already carry their own caption
            Field::Status | Field::Passes | Field::Fails | Field::BuildTime | Field::PushTime => {
                None
            }
        }
    }

    fn paint_bar(bar: &str, severity: BuildSeverity) -> ColoredString {
        match severity {
            BuildSeverity::Success => bar.green(),
            BuildSeverity::Warning => bar.yellow(),
            BuildSeverity::Danger | BuildSeverity::DangerFloor => bar.red(),
            BuildSeverity::BuildFailure => bar.red().bold(),
        }
    }

    fn paint_cell(text: &str, tier: HighlightTier) -> ColoredString {
        let hex = tier.color().trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        text.black().on_truecolor(channel(0), channel(2), channel(4))
    }
}

impl UiSurface for TerminalSurface {
    fn set_field(&self, field: &Field, text: &str) {
        match Self::caption(field) {
            Some(caption) => println!("{:<12} {}", format!("{caption}:").as_str().bold(), text),
            None => println!("{text}"),
        }
    }

    fn set_highlight(&self, cell: &CellId, tier: HighlightTier) {
        let label = format!(" {} / {} ", cell.user, cell.lab);
        println!("{} {:?}", Self::paint_cell(&label, tier), tier);
    }

    fn set_progress(&self, value: u32, label: &str, severity: BuildSeverity) {
        let filled = value.min(100) * BAR_WIDTH / 100;
        let fill_char = if severity.is_striped() { "/" } else { "#" };
        let bar = format!(
            "{}{}",
            fill_char.repeat(filled as usize),
            " ".repeat((BAR_WIDTH - filled) as usize)
        );
        println!("[{}] {}", Self::paint_bar(&bar, severity), label);
    }

    fn set_log(&self, lines: &[String]) {
        for line in lines {
            println!(" # {}", line.dimmed());
        }
    }

    fn set_table(&self, rows: &[TestScoreRow]) {
        for row in rows {
            println!(
                "{:>3}  {:<30} {:>14} {:>10}",
                row.index, row.name, row.score, row.weight
            );
        }
    }

    fn show_notice(&self, kind: NoticeKind, text: &str) {
        let painted = match kind {
            NoticeKind::Info => text.blue(),
            NoticeKind::Running => text.yellow(),
            NoticeKind::Success => text.green(),
            NoticeKind::Error => text.red().bold(),
        };
        eprintln!("{painted}");
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

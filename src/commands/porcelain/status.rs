use crate::areas::repository::Repository;
use crate::artifacts::status::inspector::{Inspector, StatusReport};
use crate::errors;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> errors::Result<StatusReport> {
        let report = Inspector::new(self).inspect()?;
        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch in &report.branches {
            if *branch == report.current_branch {
                writeln!(writer, "{}", format!("*{}", branch).green())?;
            } else {
                writeln!(writer, "{}", branch)?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for name in &report.staged {
            writeln!(writer, "{}", name)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for name in &report.removed {
            writeln!(writer, "{}", name)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for change in &report.modified {
            writeln!(writer, "{}", change)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for name in &report.untracked {
            writeln!(writer, "{}", name)?;
        }
        writeln!(writer)?;

        drop(writer);
        Ok(report)
    }
}

use crate::areas::history::RefreshHistory;
use crate::areas::repository::Repository;
use crate::artifacts::refresh::RefreshResult;
use colored::Colorize;

/// Format used for commit dates in command output
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

impl Repository {
    /// Record HEAD in `history` and print what was recorded
    ///
    /// An unchanged HEAD surfaces as `GitInfoError::NoChange` for the caller
    /// to report.
    pub fn record_refresh(
        &self,
        history: &mut dyn RefreshHistory,
        tz_override: &str,
    ) -> anyhow::Result<()> {
        let record = self.track(history, tz_override)?;

        writeln!(
            self.writer(),
            "Recorded {} on {}",
            record.result.hash.to_short_oid().yellow(),
            record.result.branch
        )?;
        self.write_summary(&record.result)?;

        Ok(())
    }

    pub(crate) fn write_summary(&self, result: &RefreshResult) -> anyhow::Result<()> {
        writeln!(self.writer(), "Commit:      {}", result.hash)?;
        writeln!(self.writer(), "Branch:      {}", result.branch)?;
        writeln!(
            self.writer(),
            "Date:        {}",
            result.commit_date.format(DATE_FORMAT)
        )?;
        writeln!(self.writer(), "Title:       {}", result.title)?;
        writeln!(self.writer(), "Description: {}", result.description)?;
        writeln!(self.writer(), "Release tag: {}", result.release_tag)?;

        Ok(())
    }
}

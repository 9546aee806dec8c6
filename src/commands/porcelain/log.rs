use crate::areas::history::RefreshHistory;
use crate::areas::repository::Repository;
use crate::artifacts::refresh::RefreshRecord;
use crate::commands::porcelain::refresh::DATE_FORMAT;
use colored::Colorize;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub oneline: bool,
    /// Show at most this many records
    pub max_count: Option<usize>,
}

impl Repository {
    /// List recorded refreshes, newest first
    pub fn log(&self, history: &dyn RefreshHistory, opts: &LogOptions) -> anyhow::Result<()> {
        let records = history.records()?;
        let limit = opts.max_count.unwrap_or(records.len());

        for (index, record) in records.iter().rev().take(limit).enumerate() {
            if opts.oneline {
                self.show_record_oneline(record)?;
            } else {
                if index > 0 {
                    writeln!(self.writer())?;
                }
                self.show_record_medium(record)?;
            }
        }

        Ok(())
    }

    fn show_record_medium(&self, record: &RefreshRecord) -> anyhow::Result<()> {
        let result = &record.result;

        writeln!(
            self.writer(),
            "{} {}{}",
            "commit".yellow(),
            result.hash.to_string().yellow(),
            Self::record_decoration(record)
        )?;
        writeln!(
            self.writer(),
            "Date:     {}",
            result.commit_date.format(DATE_FORMAT)
        )?;
        writeln!(
            self.writer(),
            "Recorded: {}",
            record.recorded_at.format(DATE_FORMAT)
        )?;
        writeln!(self.writer())?;
        writeln!(self.writer(), "    {}", result.title)?;
        if !result.description.is_empty() {
            writeln!(self.writer())?;
            writeln!(self.writer(), "    {}", result.description)?;
        }

        Ok(())
    }

    fn show_record_oneline(&self, record: &RefreshRecord) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}{} {}",
            record.result.hash.to_short_oid().yellow(),
            Self::record_decoration(record),
            record.result.title
        )?;

        Ok(())
    }

    fn record_decoration(record: &RefreshRecord) -> String {
        let branch = record.result.branch.green();

        if record.result.release_tag.is_empty() {
            format!(" ({})", branch)
        } else {
            format!(" ({}, tag: {})", branch, record.result.release_tag.cyan())
        }
    }
}

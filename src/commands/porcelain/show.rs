use crate::areas::repository::Repository;

impl Repository {
    /// Refresh without recording and print the result with its raw text
    pub fn show(&self, tz_override: &str) -> anyhow::Result<()> {
        let result = self.refresh(tz_override)?;

        writeln!(self.writer(), "Git dir:     {}", self.path().display())?;
        writeln!(
            self.writer(),
            "Timezone:    {}",
            if tz_override.is_empty() {
                "(author)"
            } else {
                tz_override
            }
        )?;
        self.write_summary(&result)?;
        writeln!(self.writer())?;
        write!(self.writer(), "{}", result.commit_text)?;

        Ok(())
    }
}

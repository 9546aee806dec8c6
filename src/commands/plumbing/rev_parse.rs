use crate::areas::repository::Repository;
use anyhow::Context;

impl Repository {
    /// Print `<hash> <branch>` for HEAD
    pub fn rev_parse(&self) -> anyhow::Result<()> {
        let head = self
            .refs()
            .resolve_head()
            .with_context(|| format!("unable to resolve HEAD in {}", self.path().display()))?;

        writeln!(self.writer(), "{} {}", head.hash, head.branch)?;

        Ok(())
    }
}

use crate::areas::repository::Repository;

impl Repository {
    pub fn cat_file(&self, object_id: &str) -> anyhow::Result<()> {
        let object_data = self.database().read_object_str(object_id)?;

        write!(self.writer(), "{}", object_data)?;

        Ok(())
    }
}

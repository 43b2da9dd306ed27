use crate::areas::repository::Repository;
use crate::artifacts::status::inspector::Inspector;
use crate::artifacts::status::status_report::StatusReport;
use crate::errors::Result;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> Result<StatusReport> {
        self.ensure_initialized()?;

        let mut index = self.index();
        index.rehydrate()?;

        let report = Inspector::new(self).inspect(&index)?;
        drop(index);

        writeln!(self.writer(), "{}", report.render(&self.config().system_name))?;

        Ok(report)
    }
}

//! Daily reports and their attachments.

use std::collections::HashMap;

use diesel::prelude::*;

use crate::domain::report::{NewReport, Report};
use crate::domain::types::ReportId;
use crate::models::report::{
    NewReport as DbNewReport, NewReportFile as DbNewReportFile, Report as DbReport,
    ReportFile as DbReportFile,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ReportReader, ReportWriter};

impl ReportReader for DieselRepository {
    fn get_report_by_id(&self, id: ReportId) -> RepositoryResult<Option<Report>> {
        use crate::schema::reports;

        let mut conn = self.conn()?;
        let Some(report) = reports::table
            .find(id.get())
            .select(DbReport::as_select())
            .first(&mut conn)
            .optional()?
        else {
            return Ok(None);
        };

        let files = DbReportFile::belonging_to(&report)
            .select(DbReportFile::as_select())
            .order(crate::schema::report_files::id.asc())
            .load(&mut conn)?;

        report
            .into_domain(files)
            .map(Some)
            .map_err(RepositoryError::from)
    }

    fn list_reports(&self) -> RepositoryResult<Vec<Report>> {
        use crate::schema::{report_files, reports};

        let mut conn = self.conn()?;
        let rows = reports::table
            .order(reports::attendance_date.desc())
            .then_order_by(reports::id.desc())
            .select(DbReport::as_select())
            .load(&mut conn)?;

        let mut files_by_report: HashMap<i32, Vec<DbReportFile>> = HashMap::new();
        for file in DbReportFile::belonging_to(&rows)
            .select(DbReportFile::as_select())
            .order(report_files::id.asc())
            .load(&mut conn)?
        {
            files_by_report.entry(file.report_id).or_default().push(file);
        }

        rows.into_iter()
            .map(|row| {
                let files = files_by_report.remove(&row.id).unwrap_or_default();
                row.into_domain(files).map_err(RepositoryError::from)
            })
            .collect()
    }
}

impl ReportWriter for DieselRepository {
    fn create_report(&self, new_report: &NewReport) -> RepositoryResult<Report> {
        use crate::schema::{report_files, reports};

        let mut conn = self.conn()?;
        let insertable: DbNewReport = new_report.into();

        let (report, files) = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let report = diesel::insert_into(reports::table)
                .values(&insertable)
                .returning(DbReport::as_returning())
                .get_result(conn)?;

            let mut files = Vec::with_capacity(new_report.upload_files.len());
            for file in &new_report.upload_files {
                let row = diesel::insert_into(report_files::table)
                    .values(DbNewReportFile::from_domain(report.id, file))
                    .returning(DbReportFile::as_returning())
                    .get_result(conn)?;
                files.push(row);
            }

            Ok((report, files))
        })?;

        report.into_domain(files).map_err(RepositoryError::from)
    }
}

use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::members;
use crate::errors::{AppError, AppResult};
use crate::models::member::{Member, MemberForm, NewMember, validate_identity};
use crate::models::program::Program;
use rusqlite::Connection;
use std::collections::HashSet;
use std::io::Read;

/// Roster search criteria; `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct MemberFilter {
    pub school_id: Option<String>,
    pub name: Option<String>,
    pub program: Option<Program>,
    pub block: Option<u8>,
    pub year_level: Option<u8>,
}

impl MemberFilter {
    pub fn is_empty(&self) -> bool {
        self.school_id.is_none()
            && self.name.is_none()
            && self.program.is_none()
            && self.block.is_none()
            && self.year_level.is_none()
    }

    pub fn matches(&self, m: &Member) -> bool {
        let contains = |hay: &str, needle: &Option<String>| match needle {
            Some(n) => hay.to_lowercase().contains(&n.trim().to_lowercase()),
            None => true,
        };

        contains(&m.school_id, &self.school_id)
            && contains(&m.name, &self.name)
            && self.program.is_none_or(|p| m.program == p)
            && self.block.is_none_or(|b| m.block == Some(b))
            && self.year_level.is_none_or(|y| m.year_level == Some(y))
    }
}

/// Fields given to `member edit`; absent ones keep the stored value.
#[derive(Debug, Clone, Default)]
pub struct MemberPatch {
    pub school_id: Option<String>,
    pub name: Option<String>,
    pub program: Option<String>,
    pub block: Option<String>,
    pub year_level: Option<String>,
}

impl MemberPatch {
    fn apply(&self, form: &mut MemberForm) {
        let set = |field: &mut String, v: &Option<String>| {
            if let Some(v) = v {
                *field = v.clone();
            }
        };
        set(&mut form.school_id, &self.school_id);
        set(&mut form.name, &self.name);
        set(&mut form.program, &self.program);
        set(&mut form.block, &self.block);
        set(&mut form.year_level, &self.year_level);
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct ImportReport {
    pub imported: usize,
    pub duplicates: usize,
    /// `Line N: reason` for every rejected line.
    pub invalid: Vec<String>,
}

#[derive(Debug, Default, PartialEq)]
pub struct RecalcReport {
    pub updated: usize,
    pub skipped: usize,
}

/// Year level for a school ID starting with a two-digit entry year.
pub fn year_level_for(school_id: &str, academic_year: i32) -> Option<u8> {
    let prefix = school_id.trim().get(0..2)?;
    if !prefix.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let entry: i32 = 2000 + prefix.parse::<i32>().ok()?;
    Some((academic_year - entry + 1).clamp(1, 4) as u8)
}

pub struct MemberLogic;

impl MemberLogic {
    pub fn add(conn: &Connection, form: &MemberForm) -> AppResult<Member> {
        let new = form.validate().map_err(|e| AppError::from_messages(&e))?;
        let id = members::insert_member(conn, &new)?;

        ttlog(conn, "member_add", &new.school_id, &format!("Added {}", new.name))?;

        members::find_by_id(conn, id)?.ok_or_else(|| AppError::MemberNotFound(new.school_id))
    }

    pub fn edit(conn: &Connection, id: i64, patch: &MemberPatch) -> AppResult<Member> {
        let current =
            members::find_by_id(conn, id)?.ok_or_else(|| AppError::MemberNotFound(id.to_string()))?;

        let mut form = MemberForm::from_member(&current);
        patch.apply(&mut form);
        let new = form.validate().map_err(|e| AppError::from_messages(&e))?;

        members::update_member(conn, id, &new)?;
        ttlog(conn, "member_edit", &new.school_id, &format!("Updated {}", new.name))?;

        members::find_by_id(conn, id)?.ok_or_else(|| AppError::MemberNotFound(id.to_string()))
    }

    pub fn delete(conn: &Connection, id: i64) -> AppResult<Member> {
        let current =
            members::find_by_id(conn, id)?.ok_or_else(|| AppError::MemberNotFound(id.to_string()))?;

        members::delete_member(conn, id)?;
        ttlog(
            conn,
            "member_del",
            &current.school_id,
            &format!("Deleted {} and their attendance", current.name),
        )?;

        Ok(current)
    }

    pub fn find(conn: &Connection, id: i64) -> AppResult<Member> {
        members::find_by_id(conn, id)?.ok_or_else(|| AppError::MemberNotFound(id.to_string()))
    }

    /// Roster ordered by name, narrowed by `filter`.
    pub fn list(conn: &Connection, filter: &MemberFilter) -> AppResult<Vec<Member>> {
        Ok(members::load_members(conn)?
            .into_iter()
            .filter(|m| filter.matches(m))
            .collect())
    }

    /// Import `school_id<TAB>name<TAB>program` lines in one transaction.
    pub fn import<R: Read>(conn: &mut Connection, input: R) -> AppResult<ImportReport> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let mut report = ImportReport::default();
        let mut pending: Vec<NewMember> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for record in reader.records() {
            let record = record.map_err(|e| AppError::Validation(format!("Import failed: {}", e)))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.iter().all(|f| f.is_empty()) {
                continue;
            }
            if record.len() < 3 {
                report
                    .invalid
                    .push(format!("Line {}: expected school ID, name and program", line));
                continue;
            }

            match validate_identity(&record[0], &record[1], &record[2]) {
                Ok((school_id, name, program)) => {
                    if !seen.insert(school_id.clone())
                        || members::find_by_school_id(conn, &school_id)?.is_some()
                    {
                        report.duplicates += 1;
                        continue;
                    }
                    pending.push(NewMember {
                        school_id,
                        name,
                        program,
                        block: None,
                        year_level: None,
                    });
                }
                Err(errors) => report
                    .invalid
                    .push(format!("Line {}: {}", line, errors.join(", "))),
            }
        }

        let tx = conn.transaction()?;
        for m in &pending {
            members::insert_member(&tx, m)?;
        }
        if !pending.is_empty() {
            ttlog(
                &tx,
                "member_import",
                "members",
                &format!(
                    "Imported {} member(s), {} duplicate(s) skipped",
                    pending.len(),
                    report.duplicates
                ),
            )?;
        }
        tx.commit()?;

        report.imported = pending.len();
        Ok(report)
    }

    /// Derive every member's year level from the entry year in their school ID.
    pub fn recalculate_year_levels(conn: &mut Connection, cfg: &Config) -> AppResult<RecalcReport> {
        let academic_year = cfg.effective_academic_year();
        let mut report = RecalcReport::default();

        let tx = conn.transaction()?;
        for m in members::load_members(&tx)? {
            match year_level_for(&m.school_id, academic_year) {
                Some(level) => {
                    if m.year_level != Some(level) {
                        members::set_year_level(&tx, m.id, level)?;
                    }
                    report.updated += 1;
                }
                None => report.skipped += 1,
            }
        }
        ttlog(
            &tx,
            "year_recalc",
            &academic_year.to_string(),
            &format!("{} updated, {} skipped", report.updated, report.skipped),
        )?;
        tx.commit()?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;

    fn form(school_id: &str, name: &str, program: &str) -> MemberForm {
        MemberForm {
            school_id: school_id.into(),
            name: name.into(),
            program: program.into(),
            block: "1".into(),
            year_level: "1".into(),
        }
    }

    #[test]
    fn add_rejects_duplicate_school_id() {
        let pool = DbPool::in_memory().unwrap();
        MemberLogic::add(&pool.conn, &form("25-0001", "Ana Cruz", "BSCS")).unwrap();
        let err = MemberLogic::add(&pool.conn, &form("25-0001", "Ben Reyes", "BSIT"));
        assert!(matches!(err, Err(AppError::DuplicateSchoolId)));
    }

    #[test]
    fn edit_keeps_unspecified_fields() {
        let pool = DbPool::in_memory().unwrap();
        let m = MemberLogic::add(&pool.conn, &form("25-0001", "Ana Cruz", "BSCS")).unwrap();

        let patch = MemberPatch {
            block: Some("3".into()),
            ..MemberPatch::default()
        };
        let edited = MemberLogic::edit(&pool.conn, m.id, &patch).unwrap();
        assert_eq!(edited.block, Some(3));
        assert_eq!(edited.name, "Ana Cruz");
        assert_eq!(edited.program, Program::Bscs);

        let bad = MemberPatch {
            name: Some("A".into()),
            ..MemberPatch::default()
        };
        assert!(matches!(
            MemberLogic::edit(&pool.conn, m.id, &bad),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn filter_is_case_insensitive() {
        let pool = DbPool::in_memory().unwrap();
        MemberLogic::add(&pool.conn, &form("25-0001", "Ana Cruz", "BSCS")).unwrap();
        MemberLogic::add(&pool.conn, &form("24-0002", "Ben Reyes", "BSIT")).unwrap();

        let by_name = MemberFilter {
            name: Some("cRuZ".into()),
            ..MemberFilter::default()
        };
        assert_eq!(MemberLogic::list(&pool.conn, &by_name).unwrap().len(), 1);

        let by_program = MemberFilter {
            program: Some(Program::Bsit),
            school_id: Some("24".into()),
            ..MemberFilter::default()
        };
        let found = MemberLogic::list(&pool.conn, &by_program).unwrap();
        assert_eq!(found[0].name, "Ben Reyes");

        let none = MemberFilter {
            block: Some(5),
            ..MemberFilter::default()
        };
        assert!(MemberLogic::list(&pool.conn, &none).unwrap().is_empty());
    }

    #[test]
    fn import_skips_invalid_and_duplicate_lines() {
        let mut pool = DbPool::in_memory().unwrap();
        MemberLogic::add(&pool.conn, &form("25-0001", "Ana Cruz", "BSCS")).unwrap();

        let tsv = "25-0001\tAna Cruz\tBSCS\n\
                   25-0002\tBen Reyes\tbsit\n\
                   \n\
                   25-0003\tC\tBSCS\n\
                   25-0004\tDana Lim\n\
                   25-0002\tBen Again\tBSIT\n\
                   25-0005\tEli Santos\tBTVTED-CSS\n";

        let report = MemberLogic::import(&mut pool.conn, tsv.as_bytes()).unwrap();
        assert_eq!(report.imported, 2);
        assert_eq!(report.duplicates, 2);
        assert_eq!(
            report.invalid,
            vec![
                "Line 4: Name must be at least 2 characters",
                "Line 5: expected school ID, name and program",
            ]
        );

        let ben = members::find_by_school_id(&pool.conn, "25-0002").unwrap().unwrap();
        assert_eq!(ben.block, None);
        assert_eq!(ben.program, Program::Bsit);
    }

    #[test]
    fn year_levels_follow_entry_year() {
        assert_eq!(year_level_for("25-197015", 2025), Some(1));
        assert_eq!(year_level_for("23-000001", 2025), Some(3));
        assert_eq!(year_level_for("18-000001", 2025), Some(4));
        assert_eq!(year_level_for("27-000001", 2025), Some(1));
        assert_eq!(year_level_for("A1-000001", 2025), None);

        let mut pool = DbPool::in_memory().unwrap();
        MemberLogic::add(&pool.conn, &form("23-0001", "Ana Cruz", "BSCS")).unwrap();
        MemberLogic::add(&pool.conn, &form("X-0002", "Ben Reyes", "BSIT")).unwrap();

        let cfg = Config {
            academic_year: Some(2025),
            ..Config::default()
        };
        let report = MemberLogic::recalculate_year_levels(&mut pool.conn, &cfg).unwrap();
        assert_eq!(report, RecalcReport { updated: 1, skipped: 1 });

        let ana = members::find_by_school_id(&pool.conn, "23-0001").unwrap().unwrap();
        assert_eq!(ana.year_level, Some(3));
    }
}

use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::{attendance, members};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::event::Event;
use crate::models::member::Member;
use crate::models::session::Session;
use crate::utils::date::{now_stamp, seconds_since};
use chrono::{DateTime, Local};
use rusqlite::Connection;

/// What a single barcode read did.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    TimedIn { member: Member, session: Session },
    TimedOut { member: Member, session: Session, minutes: i64 },
    /// Same code read again inside the cooldown window.
    Ignored { member: Member, seconds: i64 },
    /// Both time-in and time-out already recorded for this session.
    AlreadyCompleted { member: Member, session: Session },
    MemberNotFound(String),
}

impl ScanOutcome {
    /// Headline shown to the operator.
    pub fn headline(&self) -> String {
        match self {
            ScanOutcome::TimedIn { member, .. } => format!("{} - TIMED IN", member.name.to_uppercase()),
            ScanOutcome::TimedOut { member, .. } => {
                format!("{} - TIMED OUT", member.name.to_uppercase())
            }
            ScanOutcome::Ignored { member, .. } => {
                format!("{} - duplicate scan ignored", member.name.to_uppercase())
            }
            ScanOutcome::AlreadyCompleted { member, session } => format!(
                "{} - already timed in and out for the {} session",
                member.name.to_uppercase(),
                session
            ),
            ScanOutcome::MemberNotFound(code) => AppError::MemberNotFound(code.clone()).to_string(),
        }
    }

    /// Second line: program and block, or the session duration.
    pub fn detail(&self) -> Option<String> {
        match self {
            ScanOutcome::TimedIn { member, session } => Some(format!(
                "{} {} · {}",
                member.program,
                member.block_label(),
                session
            )),
            ScanOutcome::TimedOut { member, minutes, .. } => Some(format!(
                "{} {} · {}",
                member.program,
                member.block_label(),
                crate::utils::mins2readable(*minutes)
            )),
            ScanOutcome::Ignored { seconds, .. } => Some(format!("last read {}s ago", seconds)),
            _ => None,
        }
    }

    /// Reads the operator has to act on.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ScanOutcome::MemberNotFound(_) | ScanOutcome::AlreadyCompleted { .. }
        )
    }
}

/// Running totals for one scanning run.
#[derive(Debug, Default, PartialEq)]
pub struct ScanTally {
    pub timed_in: usize,
    pub timed_out: usize,
    pub ignored: usize,
    pub completed: usize,
    pub not_found: usize,
    /// Reads that could not be written to the database.
    pub failed: usize,
}

impl ScanTally {
    pub fn record(&mut self, outcome: &ScanOutcome) {
        match outcome {
            ScanOutcome::TimedIn { .. } => self.timed_in += 1,
            ScanOutcome::TimedOut { .. } => self.timed_out += 1,
            ScanOutcome::Ignored { .. } => self.ignored += 1,
            ScanOutcome::AlreadyCompleted { .. } => self.completed += 1,
            ScanOutcome::MemberNotFound(_) => self.not_found += 1,
        }
    }
}

pub struct ScanLogic;

impl ScanLogic {
    /// Toggle the attendance of the member with school ID `code` at `now`.
    pub fn scan(
        conn: &Connection,
        cfg: &Config,
        event: &Event,
        code: &str,
        forced: Option<Session>,
        now: DateTime<Local>,
    ) -> AppResult<ScanOutcome> {
        let code = code.trim();

        let Some(member) = members::find_by_school_id(conn, code)? else {
            return Ok(ScanOutcome::MemberNotFound(code.to_string()));
        };

        let session = match forced {
            Some(s) => s,
            None => Session::for_time(now.time(), cfg.cutoff()?),
        };

        let Some(record) = attendance::find_record(conn, member.id, event.id, session)? else {
            return Self::time_in(conn, event, member, session, now);
        };

        if !record.is_open() {
            return Ok(ScanOutcome::AlreadyCompleted { member, session });
        }

        let elapsed = seconds_since(&record.time_in, &now).unwrap_or(i64::MAX);
        if elapsed < cfg.scan_cooldown_seconds {
            return Ok(ScanOutcome::Ignored {
                member,
                seconds: elapsed.max(0),
            });
        }

        Self::time_out(conn, event, member, &record, now)
    }

    /// Open a record. Another station may have opened it since the lookup;
    /// that read then counts as a duplicate.
    fn time_in(
        conn: &Connection,
        event: &Event,
        member: Member,
        session: Session,
        now: DateTime<Local>,
    ) -> AppResult<ScanOutcome> {
        let stamp = now_stamp(&now);

        if attendance::insert_time_in(conn, member.id, event.id, session, &stamp)?.is_none() {
            let seconds = attendance::find_record(conn, member.id, event.id, session)?
                .and_then(|r| seconds_since(&r.time_in, &now))
                .unwrap_or(0)
                .max(0);
            return Ok(ScanOutcome::Ignored { member, seconds });
        }

        ttlog(
            conn,
            "time_in",
            &member.school_id,
            &format!("{} ({} session)", event.label(), session),
        )?;
        Ok(ScanOutcome::TimedIn { member, session })
    }

    /// Close `record`, unless it was closed since it was read.
    fn time_out(
        conn: &Connection,
        event: &Event,
        member: Member,
        record: &AttendanceRecord,
        now: DateTime<Local>,
    ) -> AppResult<ScanOutcome> {
        let session = record.session;

        if !attendance::set_time_out(conn, record.id, &now_stamp(&now))? {
            return Ok(ScanOutcome::AlreadyCompleted { member, session });
        }

        ttlog(
            conn,
            "time_out",
            &member.school_id,
            &format!("{} ({} session)", event.label(), session),
        )?;

        let minutes = seconds_since(&record.time_in, &now).unwrap_or(0).max(0) / 60;
        Ok(ScanOutcome::TimedOut {
            member,
            session,
            minutes,
        })
    }
}

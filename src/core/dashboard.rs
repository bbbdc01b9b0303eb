use crate::db::{attendance, events, members};
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, RESET};
use crate::utils::date::long_date;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Headline numbers for the day.
#[derive(Debug, PartialEq)]
pub struct DashboardStats {
    pub total_members: i64,
    pub total_events: i64,
    pub today_attendance: i64,
    pub active_events: i64,
}

pub struct DashboardLogic;

impl DashboardLogic {
    pub fn stats(conn: &Connection, today: NaiveDate) -> AppResult<DashboardStats> {
        Ok(DashboardStats {
            total_members: members::count_members(conn)?,
            total_events: events::count_events(conn)?,
            today_attendance: attendance::count_time_ins_on(conn, &today)?,
            active_events: events::count_events_on(conn, &today)?,
        })
    }

    pub fn print(stats: &DashboardStats, today: NaiveDate, officer_name: &str) {
        header(format!("📊 Dashboard · {}", long_date(&today)));
        println!("Welcome back, {}\n", officer_name);

        let cards = [
            ("Total members", stats.total_members),
            ("Total events", stats.total_events),
            ("Today's attendance", stats.today_attendance),
            ("Active events", stats.active_events),
        ];
        for (label, n) in cards {
            println!("{}• {:<20}{} {}{}{}", CYAN, label, RESET, GREEN, n, RESET);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;
    use rusqlite::params;

    #[test]
    fn counts_only_today() {
        let pool = DbPool::in_memory().unwrap();
        let conn = &pool.conn;
        conn.execute_batch(
            "INSERT INTO members (school_id, name, program, created_at)
                 VALUES ('25-1', 'Ana Cruz', 'BSCS', '2025-09-01T08:00:00+08:00'),
                        ('25-2', 'Ben Reyes', 'BSIT', '2025-09-01T08:00:00+08:00');
             INSERT INTO events (name, event_date, created_at)
                 VALUES ('Assembly', '2025-09-02', '2025-09-01T08:00:00+08:00'),
                        ('Fair', '2025-09-03', '2025-09-01T08:00:00+08:00');",
        )
        .unwrap();
        for (member, time_in) in [(1, "2025-09-02T08:00:00+08:00"), (2, "2025-09-03T08:00:00+08:00")] {
            conn.execute(
                "INSERT INTO attendance (event_id, member_id, session, time_in) VALUES (1, ?1, 'morning', ?2)",
                params![member, time_in],
            )
            .unwrap();
        }

        let day = NaiveDate::from_ymd_opt(2025, 9, 2).unwrap();
        assert_eq!(
            DashboardLogic::stats(conn, day).unwrap(),
            DashboardStats {
                total_members: 2,
                total_events: 2,
                today_attendance: 1,
                active_events: 1,
            }
        );
    }
}

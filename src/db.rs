use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, Result};
use std::path::Path;

use crate::models::{DaySchedule, Priority, ScheduleSession, SessionKind, StudyPlan, Topic};

pub struct Database {
    conn: Connection,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Stats {
    pub total_topics: i64,
    pub total_plans: i64,
    pub total_planned_hours: f64,
    pub next_exam: Option<String>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS topics (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                priority TEXT NOT NULL CHECK(priority IN ('high', 'medium', 'low')),
                hours REAL NOT NULL CHECK(hours > 0),
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS plans (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                exam_date TEXT NOT NULL,
                daily_hours REAL NOT NULL CHECK(daily_hours > 0),
                academic_level TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS plan_days (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                plan_id INTEGER NOT NULL,
                day_number INTEGER NOT NULL,
                date TEXT NOT NULL,
                available_hours REAL NOT NULL,
                FOREIGN KEY (plan_id) REFERENCES plans(id) ON DELETE CASCADE
            );

            -- position preserves session assignment order within a day
            CREATE TABLE IF NOT EXISTS plan_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                plan_day_id INTEGER NOT NULL,
                topic_name TEXT NOT NULL,
                hours REAL NOT NULL,
                kind TEXT NOT NULL CHECK(kind IN ('new', 'review')),
                position INTEGER NOT NULL,
                FOREIGN KEY (plan_day_id) REFERENCES plan_days(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_plan_days_plan ON plan_days(plan_id);
            CREATE INDEX IF NOT EXISTS idx_plan_sessions_day ON plan_sessions(plan_day_id);
            CREATE INDEX IF NOT EXISTS idx_plans_exam_date ON plans(exam_date);
            "#,
        )?;

        Ok(())
    }

    // Topic operations
    pub fn add_topic(&self, name: &str, priority: Priority, hours: f64) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO topics (name, priority, hours, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![name, priority.as_str(), hours, Utc::now().to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_topics(&self) -> Result<Vec<Topic>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, priority, hours, created_at FROM topics ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            let priority_str: String = row.get(2)?;
            Ok(Topic {
                id: row.get(0)?,
                name: row.get(1)?,
                priority: Priority::from_str(&priority_str).unwrap_or(Priority::Medium),
                hours: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>>>()
    }

    pub fn delete_topic(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM topics WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Plan operations. A plan and its full schedule are written in one
    // transaction; a saved schedule is never mutated afterwards.
    pub fn save_plan(
        &mut self,
        exam_date: NaiveDate,
        daily_hours: f64,
        academic_level: &str,
        schedule: &[DaySchedule],
    ) -> Result<i64> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO plans (exam_date, daily_hours, academic_level, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                exam_date.to_string(),
                daily_hours,
                academic_level,
                Utc::now().to_rfc3339()
            ],
        )?;
        let plan_id = tx.last_insert_rowid();

        for day in schedule {
            tx.execute(
                "INSERT INTO plan_days (plan_id, day_number, date, available_hours) VALUES (?1, ?2, ?3, ?4)",
                params![plan_id, day.day_number, day.date.to_string(), day.available_hours],
            )?;
            let day_id = tx.last_insert_rowid();

            let mut position = 0i64;
            for topic in &day.topics {
                for session in &topic.sessions {
                    tx.execute(
                        "INSERT INTO plan_sessions (plan_day_id, topic_name, hours, kind, position) VALUES (?1, ?2, ?3, ?4, ?5)",
                        params![
                            day_id,
                            topic.topic_name,
                            session.hours,
                            session.kind.as_str(),
                            position
                        ],
                    )?;
                    position += 1;
                }
            }
        }

        tx.commit()?;
        Ok(plan_id)
    }

    pub fn list_plans(&self) -> Result<Vec<StudyPlan>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, exam_date, daily_hours, academic_level, created_at FROM plans ORDER BY id DESC",
        )?;

        let rows = stmt.query_map([], |row| self.map_plan_row(row))?;
        rows.collect::<Result<Vec<_>>>()
    }

    pub fn get_plan(&self, id: i64) -> Result<Option<StudyPlan>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, exam_date, daily_hours, academic_level, created_at FROM plans WHERE id = ?1",
        )?;

        let plan = stmt.query_row(params![id], |row| self.map_plan_row(row));
        match plan {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn latest_plan(&self) -> Result<Option<StudyPlan>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, exam_date, daily_hours, academic_level, created_at FROM plans ORDER BY id DESC LIMIT 1",
        )?;

        let plan = stmt.query_row([], |row| self.map_plan_row(row));
        match plan {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn map_plan_row(&self, row: &rusqlite::Row) -> Result<StudyPlan> {
        let exam_date_str: String = row.get(1)?;
        Ok(StudyPlan {
            id: row.get(0)?,
            exam_date: exam_date_str.parse().map_err(|_| {
                rusqlite::Error::InvalidColumnType(1, "exam_date".to_string(), rusqlite::types::Type::Text)
            })?,
            daily_hours: row.get(2)?,
            academic_level: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    pub fn get_schedule(&self, plan_id: i64) -> Result<Vec<DaySchedule>> {
        let mut day_stmt = self.conn.prepare(
            "SELECT id, day_number, date, available_hours FROM plan_days WHERE plan_id = ?1 ORDER BY day_number",
        )?;

        let day_rows = day_stmt.query_map(params![plan_id], |row| {
            let date_str: String = row.get(2)?;
            let date: NaiveDate = date_str.parse().map_err(|_| {
                rusqlite::Error::InvalidColumnType(2, "date".to_string(), rusqlite::types::Type::Text)
            })?;
            Ok((
                row.get::<_, i64>(0)?,
                DaySchedule {
                    date,
                    day_number: row.get(1)?,
                    topics: Vec::new(),
                    total_scheduled_hours: 0.0,
                    available_hours: row.get(3)?,
                },
            ))
        })?;

        let mut days = Vec::new();
        for row in day_rows {
            let (day_id, mut day) = row?;
            self.load_day_sessions(day_id, &mut day)?;
            days.push(day);
        }

        Ok(days)
    }

    fn load_day_sessions(&self, day_id: i64, day: &mut DaySchedule) -> Result<()> {
        let mut stmt = self.conn.prepare(
            "SELECT topic_name, hours, kind FROM plan_sessions WHERE plan_day_id = ?1 ORDER BY position",
        )?;

        let rows = stmt.query_map(params![day_id], |row| {
            let kind_str: String = row.get(2)?;
            Ok((
                row.get::<_, String>(0)?,
                ScheduleSession {
                    hours: row.get(1)?,
                    kind: SessionKind::from_str(&kind_str).unwrap_or(SessionKind::New),
                },
            ))
        })?;

        for row in rows {
            let (topic_name, session) = row?;
            // Rebuilds the merged per-topic entries in stored order
            day.add_session(&topic_name, session.hours, session.kind);
        }

        Ok(())
    }

    pub fn delete_plan(&self, id: i64) -> Result<bool> {
        // Cascade manually; foreign_keys pragma is off by default
        self.conn.execute(
            "DELETE FROM plan_sessions WHERE plan_day_id IN (SELECT id FROM plan_days WHERE plan_id = ?1)",
            params![id],
        )?;
        self.conn
            .execute("DELETE FROM plan_days WHERE plan_id = ?1", params![id])?;
        let rows = self
            .conn
            .execute("DELETE FROM plans WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    pub fn get_stats(&self) -> Result<Stats> {
        let total_topics: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM topics", [], |row| row.get(0))?;
        let total_plans: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM plans", [], |row| row.get(0))?;
        let total_planned_hours: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(hours), 0) FROM plan_sessions",
            [],
            |row| row.get(0),
        )?;
        let next_exam: Option<String> = self
            .conn
            .query_row(
                "SELECT MIN(exam_date) FROM plans WHERE exam_date >= date('now')",
                [],
                |row| row.get(0),
            )
            .unwrap_or(None);

        Ok(Stats {
            total_topics,
            total_plans,
            total_planned_hours,
            next_exam,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::build_schedule;

    fn open_test_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.init().unwrap();
        db
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod topic_tests {
        use super::*;

        #[test]
        fn add_and_list_topics() {
            let db = open_test_db();
            db.add_topic("Calculus", Priority::High, 5.0).unwrap();
            db.add_topic("History", Priority::Low, 3.0).unwrap();

            let topics = db.list_topics().unwrap();
            assert_eq!(topics.len(), 2);
            assert_eq!(topics[0].name, "Calculus");
            assert_eq!(topics[0].priority, Priority::High);
            assert_eq!(topics[0].hours, 5.0);
            assert_eq!(topics[1].name, "History");
        }

        #[test]
        fn list_preserves_insertion_order() {
            let db = open_test_db();
            for name in ["B", "A", "C"] {
                db.add_topic(name, Priority::Medium, 1.0).unwrap();
            }

            let names: Vec<String> = db.list_topics().unwrap().into_iter().map(|t| t.name).collect();
            assert_eq!(names, vec!["B", "A", "C"]);
        }

        #[test]
        fn delete_topic_removes_row() {
            let db = open_test_db();
            let id = db.add_topic("Calculus", Priority::High, 5.0).unwrap();

            assert!(db.delete_topic(id).unwrap());
            assert!(db.list_topics().unwrap().is_empty());
        }

        #[test]
        fn delete_missing_topic_returns_false() {
            let db = open_test_db();
            assert!(!db.delete_topic(99).unwrap());
        }
    }

    mod plan_tests {
        use super::*;

        pub(super) fn sample_schedule() -> Vec<DaySchedule> {
            let topics = vec![Topic {
                id: 0,
                name: "Calculus".to_string(),
                priority: Priority::High,
                hours: 5.0,
                created_at: String::new(),
            }];
            build_schedule(date(2026, 3, 1), date(2026, 3, 4), 2.0, &topics).unwrap()
        }

        #[test]
        fn save_and_reload_schedule_round_trips() {
            let mut db = open_test_db();
            let schedule = sample_schedule();
            let plan_id = db
                .save_plan(date(2026, 3, 4), 2.0, "Class 12", &schedule)
                .unwrap();

            let loaded = db.get_schedule(plan_id).unwrap();
            assert_eq!(loaded.len(), schedule.len());
            for (orig, got) in schedule.iter().zip(&loaded) {
                assert_eq!(orig.date, got.date);
                assert_eq!(orig.day_number, got.day_number);
                assert_eq!(orig.available_hours, got.available_hours);
                assert_eq!(orig.total_scheduled_hours, got.total_scheduled_hours);
                assert_eq!(orig.topics.len(), got.topics.len());
                for (ot, gt) in orig.topics.iter().zip(&got.topics) {
                    assert_eq!(ot.topic_name, gt.topic_name);
                    assert_eq!(ot.total_hours, gt.total_hours);
                    assert_eq!(ot.sessions.len(), gt.sessions.len());
                    for (os, gs) in ot.sessions.iter().zip(&gt.sessions) {
                        assert_eq!(os.hours, gs.hours);
                        assert_eq!(os.kind, gs.kind);
                    }
                }
            }
        }

        #[test]
        fn get_plan_returns_inputs() {
            let mut db = open_test_db();
            let plan_id = db
                .save_plan(date(2026, 3, 4), 2.0, "Class 12", &sample_schedule())
                .unwrap();

            let plan = db.get_plan(plan_id).unwrap().unwrap();
            assert_eq!(plan.exam_date, date(2026, 3, 4));
            assert_eq!(plan.daily_hours, 2.0);
            assert_eq!(plan.academic_level, "Class 12");
        }

        #[test]
        fn get_missing_plan_returns_none() {
            let db = open_test_db();
            assert!(db.get_plan(42).unwrap().is_none());
        }

        #[test]
        fn list_plans_newest_first() {
            let mut db = open_test_db();
            let schedule = sample_schedule();
            let first = db
                .save_plan(date(2026, 3, 4), 2.0, "Class 12", &schedule)
                .unwrap();
            let second = db
                .save_plan(date(2026, 4, 1), 3.0, "Class 12", &schedule)
                .unwrap();

            let plans = db.list_plans().unwrap();
            assert_eq!(plans.len(), 2);
            assert_eq!(plans[0].id, second);
            assert_eq!(plans[1].id, first);
        }

        #[test]
        fn latest_plan_returns_most_recent() {
            let mut db = open_test_db();
            assert!(db.latest_plan().unwrap().is_none());

            let schedule = sample_schedule();
            db.save_plan(date(2026, 3, 4), 2.0, "Class 12", &schedule)
                .unwrap();
            let newest = db
                .save_plan(date(2026, 4, 1), 3.0, "Class 12", &schedule)
                .unwrap();

            assert_eq!(db.latest_plan().unwrap().unwrap().id, newest);
        }

        #[test]
        fn delete_plan_removes_days_and_sessions() {
            let mut db = open_test_db();
            let plan_id = db
                .save_plan(date(2026, 3, 4), 2.0, "Class 12", &sample_schedule())
                .unwrap();

            assert!(db.delete_plan(plan_id).unwrap());
            assert!(db.get_plan(plan_id).unwrap().is_none());
            assert!(db.get_schedule(plan_id).unwrap().is_empty());
        }
    }

    mod stats_tests {
        use super::*;

        #[test]
        fn empty_database_has_zero_stats() {
            let db = open_test_db();
            let stats = db.get_stats().unwrap();
            assert_eq!(stats.total_topics, 0);
            assert_eq!(stats.total_plans, 0);
            assert_eq!(stats.total_planned_hours, 0.0);
            assert!(stats.next_exam.is_none());
        }

        #[test]
        fn stats_count_topics_and_plans() {
            let mut db = open_test_db();
            db.add_topic("Calculus", Priority::High, 5.0).unwrap();
            db.add_topic("History", Priority::Low, 3.0).unwrap();

            let schedule = plan_tests::sample_schedule();
            db.save_plan(date(2026, 3, 4), 2.0, "Class 12", &schedule)
                .unwrap();

            let stats = db.get_stats().unwrap();
            assert_eq!(stats.total_topics, 2);
            assert_eq!(stats.total_plans, 1);
            // 5h of new material + 1h review
            assert_eq!(stats.total_planned_hours, 6.0);
        }
    }
}

//! Dashboard counters and time-bucketed series derived from entity listings.

use chrono::{DateTime, Days, Local, NaiveDate, Utc};

use crate::contract::model::{DashboardStats, Examination, Role, TrendPoint, User, WeeklyPoint};

pub const TREND_DAYS: u32 = 7;
pub const ACTIVITY_WEEKS: u32 = 4;

/// Today's calendar date in local time.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn local_date(ts: &DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

fn count_role(users: &[User], role: Role) -> u64 {
    users.iter().filter(|u| u.role == role).count() as u64
}

pub fn compute_dashboard_stats(
    users: &[User],
    examinations: &[Examination],
    today: NaiveDate,
) -> DashboardStats {
    let staff_count = count_role(users, Role::Staff);
    DashboardStats {
        total_users: users.len() as u64,
        total_examinations: examinations.len() as u64,
        active_staff: staff_count,
        today_examinations: examinations.iter().filter(|e| e.tanggal == today).count() as u64,
        admin_count: count_role(users, Role::Admin),
        staff_count,
        patient_count: count_role(users, Role::Patient),
    }
}

/// Examinations per day over the trailing `days` days ending on `today`,
/// oldest first. Bucketing uses each record's creation date.
pub fn daily_examination_trend(
    examinations: &[Examination],
    today: NaiveDate,
    days: u32,
) -> Vec<TrendPoint> {
    (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back as u64)))
        .map(|date| TrendPoint {
            label: date.format("%Y-%m-%d").to_string(),
            examinations: examinations
                .iter()
                .filter(|e| local_date(&e.created_at) == date)
                .count() as u64,
        })
        .collect()
}

/// Examinations and new users per 7-day week over the trailing `weeks` weeks.
/// The last bucket ends on `today`. Labels run `Week 1` (oldest) upwards.
pub fn weekly_activity(
    examinations: &[Examination],
    users: &[User],
    today: NaiveDate,
    weeks: u32,
) -> Vec<WeeklyPoint> {
    let mut out = Vec::with_capacity(weeks as usize);
    for week in 0..weeks {
        let back_end = ((weeks - 1 - week) * 7) as u64;
        let Some(end) = today.checked_sub_days(Days::new(back_end)) else {
            continue;
        };
        let Some(start) = end.checked_sub_days(Days::new(6)) else {
            continue;
        };
        let in_week = |ts: &DateTime<Utc>| {
            let d = local_date(ts);
            d >= start && d <= end
        };

        out.push(WeeklyPoint {
            label: format!("Week {}", week + 1),
            examinations: examinations.iter().filter(|e| in_week(&e.created_at)).count()
                as u64,
            users: users.iter().filter(|u| in_week(&u.created_at)).count() as u64,
        });
    }
    out
}

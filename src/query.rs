//! Filter and sort projection over the task list.
//!
//! [`project`] is a pure function: filter first, then a stable sort, both
//! recomputed on every call. `now` is passed in rather than read from the
//! clock so date-window behaviour is testable.

use chrono::{DateTime, Duration, Utc};

use crate::fields::{DateFilter, SortKey, SortOrder, TaskFilters};
use crate::task::Task;

/// Apply `filters` then sort by `sort_key`/`sort_order`, returning the
/// projected list. Ties keep their input order.
pub fn project(
    tasks: &[Task],
    filters: &TaskFilters,
    sort_key: SortKey,
    sort_order: SortOrder,
    now: DateTime<Utc>,
) -> Vec<Task> {
    let mut out: Vec<Task> = tasks
        .iter()
        .filter(|t| matches(t, filters, now))
        .cloned()
        .collect();
    out.sort_by(|a, b| {
        let ord = match sort_key {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Deadline => deadline_millis(a).cmp(&deadline_millis(b)),
            SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
        };
        match sort_order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    out
}

fn matches(task: &Task, filters: &TaskFilters, now: DateTime<Utc>) -> bool {
    if !filters.status.matches(task.status) {
        return false;
    }
    if !filters.priority.matches(task.priority) {
        return false;
    }
    // Date window runs against the deadline when one exists, otherwise
    // against the creation time.
    let date = task.deadline.unwrap_or(task.created_at);
    match filters.date {
        DateFilter::All => true,
        DateFilter::Today => date.date_naive() == now.date_naive(),
        DateFilter::Week => date >= now - Duration::days(7),
        DateFilter::Month => date >= now - Duration::days(30),
    }
}

/// Missing deadlines sort as +infinity so they always land last in
/// ascending order.
fn deadline_millis(task: &Task) -> i64 {
    task.deadline.map(|d| d.timestamp_millis()).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Priority, PriorityFilter, Status, StatusFilter};
    use chrono::TimeZone;

    fn at(hours_ago: i64) -> DateTime<Utc> {
        fixed_now() - Duration::hours(hours_ago)
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn task(id: &str, priority: Priority, created: DateTime<Utc>, deadline: Option<DateTime<Utc>>) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            status: Status::Pending,
            priority,
            deadline,
            created_at: created,
            updated_at: created,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_all_filters_keep_input_order() {
        // Identical priorities make the sort a tie everywhere, so the
        // stable sort must hand back the input order untouched.
        let tasks = vec![
            task("c", Priority::Medium, at(1), None),
            task("a", Priority::Medium, at(2), None),
            task("b", Priority::Medium, at(3), None),
        ];
        let out = project(
            &tasks,
            &TaskFilters::default(),
            SortKey::Priority,
            SortOrder::Asc,
            fixed_now(),
        );
        assert_eq!(ids(&out), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_status_filter_exact_match() {
        let mut done = task("done", Priority::Low, at(1), None);
        done.status = Status::Completed;
        let tasks = vec![task("open", Priority::Low, at(2), None), done];

        let filters = TaskFilters {
            status: StatusFilter::Completed,
            ..TaskFilters::default()
        };
        let out = project(&tasks, &filters, SortKey::CreatedAt, SortOrder::Asc, fixed_now());
        assert_eq!(ids(&out), vec!["done"]);
    }

    #[test]
    fn test_priority_filter_exact_match() {
        let tasks = vec![
            task("lo", Priority::Low, at(1), None),
            task("hi", Priority::High, at(2), None),
        ];
        let filters = TaskFilters {
            priority: PriorityFilter::High,
            ..TaskFilters::default()
        };
        let out = project(&tasks, &filters, SortKey::CreatedAt, SortOrder::Asc, fixed_now());
        assert_eq!(ids(&out), vec!["hi"]);
    }

    #[test]
    fn test_today_excludes_yesterday_created_task() {
        let tasks = vec![
            task("yesterday", Priority::Low, at(24), None),
            task("this-morning", Priority::Low, at(3), None),
        ];
        let filters = TaskFilters {
            date: DateFilter::Today,
            ..TaskFilters::default()
        };
        let out = project(&tasks, &filters, SortKey::CreatedAt, SortOrder::Asc, fixed_now());
        assert_eq!(ids(&out), vec!["this-morning"]);
    }

    #[test]
    fn test_today_prefers_deadline_over_created_at() {
        // Created yesterday but due today: the deadline wins the check.
        let tasks = vec![task("due-today", Priority::Low, at(24), Some(at(2)))];
        let filters = TaskFilters {
            date: DateFilter::Today,
            ..TaskFilters::default()
        };
        let out = project(&tasks, &filters, SortKey::CreatedAt, SortOrder::Asc, fixed_now());
        assert_eq!(ids(&out), vec!["due-today"]);
    }

    #[test]
    fn test_week_window_is_rolling() {
        let tasks = vec![
            task("recent", Priority::Low, at(6 * 24), None),
            task("stale", Priority::Low, at(8 * 24), None),
        ];
        let filters = TaskFilters {
            date: DateFilter::Week,
            ..TaskFilters::default()
        };
        let out = project(&tasks, &filters, SortKey::CreatedAt, SortOrder::Asc, fixed_now());
        assert_eq!(ids(&out), vec!["recent"]);
    }

    #[test]
    fn test_month_window_is_rolling() {
        let tasks = vec![
            task("in", Priority::Low, at(29 * 24), None),
            task("out", Priority::Low, at(31 * 24), None),
        ];
        let filters = TaskFilters {
            date: DateFilter::Month,
            ..TaskFilters::default()
        };
        let out = project(&tasks, &filters, SortKey::CreatedAt, SortOrder::Asc, fixed_now());
        assert_eq!(ids(&out), vec!["in"]);
    }

    #[test]
    fn test_deadline_sort_puts_missing_deadlines_last() {
        let tasks = vec![
            task("none-1", Priority::Low, at(1), None),
            task("soon", Priority::Low, at(2), Some(at(-2))),
            task("none-2", Priority::Low, at(3), None),
            task("later", Priority::Low, at(4), Some(at(-20))),
        ];
        let out = project(
            &tasks,
            &TaskFilters::default(),
            SortKey::Deadline,
            SortOrder::Asc,
            fixed_now(),
        );
        assert_eq!(ids(&out), vec!["soon", "later", "none-1", "none-2"]);
    }

    #[test]
    fn test_priority_sort_is_monotonic_both_ways() {
        let tasks = vec![
            task("m", Priority::Medium, at(1), None),
            task("h", Priority::High, at(2), None),
            task("l", Priority::Low, at(3), None),
        ];
        let asc = project(
            &tasks,
            &TaskFilters::default(),
            SortKey::Priority,
            SortOrder::Asc,
            fixed_now(),
        );
        let ranks: Vec<u8> = asc.iter().map(|t| t.priority.rank()).collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));

        let desc = project(
            &tasks,
            &TaskFilters::default(),
            SortKey::Priority,
            SortOrder::Desc,
            fixed_now(),
        );
        let ranks: Vec<u8> = desc.iter().map(|t| t.priority.rank()).collect();
        assert!(ranks.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_created_at_sort_desc() {
        let tasks = vec![
            task("old", Priority::Low, at(10), None),
            task("new", Priority::Low, at(1), None),
        ];
        let out = project(
            &tasks,
            &TaskFilters::default(),
            SortKey::CreatedAt,
            SortOrder::Desc,
            fixed_now(),
        );
        assert_eq!(ids(&out), vec!["new", "old"]);
    }
}

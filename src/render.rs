//! The task list renderer.
//!
//! A pure pipeline over an already-fetched batch of tasks: compute the
//! index padding width, sort for display, group by list, and format one
//! line of styled segments per task. No I/O happens here; the command
//! layer paints the returned lines through the theme.

use std::cmp::Ordering;

use crate::style::{Line, Role, Segment};
use crate::task::Task;

/// Width of the priority column: `"(2)| "` / `"|    "` / `" x   "`.
const PRIORITY_COL: usize = 5;

/// Decimal digit width of the largest index in the batch.
///
/// Computed with a max-reduction over the full batch, independent of the
/// display order, so every row of the listing pads to the same width.
pub fn index_width(tasks: &[Task]) -> usize {
    let max = tasks.iter().map(|t| t.index).max().unwrap_or(0);
    digits(max)
}

fn digits(mut n: u64) -> usize {
    let mut width = 1;
    while n >= 10 {
        n /= 10;
        width += 1;
    }
    width
}

/// Sort a batch for display, returning a new ordered view.
///
/// Total order, most significant key first: list name ascending (byte-wise
/// `str` ordering), active before done, priority descending, due date
/// ascending with absent due after all dated tasks, and finally index
/// ascending so ties are stable across runs.
pub fn display_order(tasks: &[Task]) -> Vec<&Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by(|a, b| compare(a, b));
    ordered
}

fn compare(a: &Task, b: &Task) -> Ordering {
    a.list
        .cmp(&b.list)
        .then(a.is_done().cmp(&b.is_done()))
        .then(b.priority.cmp(&a.priority))
        .then(due_key(a).cmp(&due_key(b)))
        .then(a.index.cmp(&b.index))
}

/// Absent due dates sort after every dated task.
fn due_key(task: &Task) -> i64 {
    task.due.map_or(i64::MAX, |d| d.timestamp())
}

/// Render a non-empty batch of tasks into grouped, styled lines.
///
/// Emits a section header whenever the list name changes (indented one
/// column past the index), with a blank line before every header except
/// the first, then one row per task.
pub fn render_listing(tasks: &[Task], dateformat: &str) -> Vec<Line> {
    let width = index_width(tasks);
    let ordered = display_order(tasks);

    let mut lines = Vec::new();
    let mut current_list: Option<&str> = None;

    for task in ordered {
        if current_list != Some(task.list.as_str()) {
            if current_list.is_some() {
                lines.push(Line::blank());
            }
            current_list = Some(task.list.as_str());
            lines.push(header_line(&task.list, width));
        }
        lines.push(task_line(task, width, dateformat));
    }

    lines
}

fn header_line(list: &str, width: usize) -> Line {
    Line(vec![
        Segment::plain(" ".repeat(width + 1)),
        Segment::styled(list, Role::List),
    ])
}

fn task_line(task: &Task, width: usize, dateformat: &str) -> Line {
    let mut segs = Vec::new();

    segs.push(Segment::styled(
        format!("{:0width$}", task.index),
        Role::Index,
    ));
    segs.push(Segment::plain("| "));

    // Priority column. Done tasks show the completion glyph padded to the
    // same width so names align across states.
    if task.is_done() {
        segs.push(Segment::plain(" "));
        segs.push(Segment::styled("x", Role::Completed));
        segs.push(Segment::plain(" ".repeat(PRIORITY_COL - 2)));
    } else if task.priority == 0 {
        segs.push(Segment::plain("|    "));
    } else {
        segs.push(Segment::styled(
            format!("({})", task.priority),
            Role::Priority(task.priority),
        ));
        segs.push(Segment::plain("| "));
    }

    let name_role = if task.is_done() {
        Role::Completed
    } else {
        Role::Priority(task.priority)
    };
    segs.push(Segment::plain("| "));
    segs.push(Segment::styled(task.name.clone(), name_role));

    // Done tasks grey out their note and tag accents too.
    let accent = |role: Role| if task.is_done() { Role::Completed } else { role };

    for _ in &task.notes {
        segs.push(Segment::styled("*", accent(Role::Notes)));
    }

    for tag in &task.tags {
        segs.push(Segment::plain(" "));
        segs.push(Segment::styled(format!("#{}", tag), accent(Role::Tags)));
    }

    // Trailing date: due date while active, completion date once done.
    match task.completed {
        Some(done_at) => {
            segs.push(Segment::plain(" "));
            segs.push(Segment::styled("x", Role::Completed));
            segs.push(Segment::plain(" "));
            segs.push(Segment::styled(
                done_at.format(dateformat).to_string(),
                Role::Completed,
            ));
        }
        None => {
            if let Some(due) = task.due {
                segs.push(Segment::plain(" "));
                segs.push(Segment::styled("|", Role::Due));
                segs.push(Segment::plain(" "));
                segs.push(Segment::styled(
                    due.format(dateformat).to_string(),
                    Role::Due,
                ));
            }
        }
    }

    Line(segs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const DATEFORMAT: &str = "%Y-%m-%d";

    fn make_task(index: u64, list: &str, name: &str) -> Task {
        Task {
            index,
            list: list.to_string(),
            name: name.to_string(),
            priority: 0,
            notes: vec![],
            tags: vec![],
            due: None,
            completed: None,
        }
    }

    fn done_at(mut task: Task, y: i32, m: u32, d: u32) -> Task {
        task.completed = Some(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap());
        task
    }

    fn due_at(mut task: Task, y: i32, m: u32, d: u32) -> Task {
        task.due = Some(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap());
        task
    }

    fn plain_lines(tasks: &[Task]) -> Vec<String> {
        render_listing(tasks, DATEFORMAT)
            .iter()
            .map(|l| l.plain())
            .collect()
    }

    #[test]
    fn test_index_width_ignores_order() {
        let tasks = vec![
            make_task(15, "Work", "c"),
            make_task(1, "Inbox", "a"),
            make_task(2, "Inbox", "b"),
        ];
        assert_eq!(index_width(&tasks), 2);

        let mut reversed = tasks.clone();
        reversed.reverse();
        assert_eq!(index_width(&reversed), 2);
    }

    #[test]
    fn test_index_width_boundaries() {
        assert_eq!(index_width(&[make_task(9, "A", "x")]), 1);
        assert_eq!(index_width(&[make_task(10, "A", "x")]), 2);
        assert_eq!(index_width(&[make_task(100, "A", "x")]), 3);
    }

    #[test]
    fn test_padding_is_uniform_across_rows() {
        let tasks = vec![
            make_task(1, "Inbox", "a"),
            make_task(2, "Inbox", "b"),
            make_task(15, "Work", "c"),
        ];
        let lines = plain_lines(&tasks);

        assert!(lines.iter().any(|l| l.starts_with("01| ")));
        assert!(lines.iter().any(|l| l.starts_with("02| ")));
        assert!(lines.iter().any(|l| l.starts_with("15| ")));
    }

    #[test]
    fn test_groups_are_contiguous_with_one_header_each() {
        let tasks = vec![
            make_task(15, "Work", "report"),
            make_task(1, "Inbox", "call"),
            make_task(2, "Inbox", "mail"),
        ];
        let lines = plain_lines(&tasks);

        // Header = indent of width+1 spaces, then the list name.
        assert_eq!(
            lines,
            vec![
                "   Inbox".to_string(),
                "01| |    | call".to_string(),
                "02| |    | mail".to_string(),
                "".to_string(),
                "   Work".to_string(),
                "15| |    | report".to_string(),
            ]
        );
    }

    #[test]
    fn test_blank_separator_between_groups_only() {
        let tasks = vec![make_task(1, "Inbox", "a"), make_task(2, "Work", "b")];
        let lines = render_listing(&tasks, DATEFORMAT);

        // header, row, blank, header, row
        assert_eq!(lines.len(), 5);
        assert!(lines[2].is_blank());
        assert_eq!(lines.iter().filter(|l| l.is_blank()).count(), 1);
    }

    #[test]
    fn test_active_before_done_within_a_list() {
        let tasks = vec![
            done_at(make_task(1, "Inbox", "old"), 2026, 1, 5),
            make_task(2, "Inbox", "new"),
        ];
        let ordered = display_order(&tasks);

        assert_eq!(ordered[0].name, "new");
        assert_eq!(ordered[1].name, "old");
    }

    #[test]
    fn test_higher_priority_first_among_active() {
        let mut low = make_task(1, "Inbox", "low");
        low.priority = 1;
        let mut high = make_task(2, "Inbox", "high");
        high.priority = 3;
        let none = make_task(3, "Inbox", "none");

        let batch = [low, high, none];
        let ordered = display_order(&batch);
        let names: Vec<&str> = ordered.iter().map(|t| t.name.as_str()).collect();

        assert_eq!(names, vec!["high", "low", "none"]);
    }

    #[test]
    fn test_earlier_due_first_and_absent_due_last() {
        let soon = due_at(make_task(1, "Inbox", "soon"), 2026, 9, 1);
        let later = due_at(make_task(2, "Inbox", "later"), 2026, 12, 1);
        let never = make_task(3, "Inbox", "never");

        let batch = [later, never, soon];
        let ordered = display_order(&batch);
        let names: Vec<&str> = ordered.iter().map(|t| t.name.as_str()).collect();

        assert_eq!(names, vec!["soon", "later", "never"]);
    }

    #[test]
    fn test_ties_break_by_index() {
        let a = make_task(8, "Inbox", "second");
        let b = make_task(3, "Inbox", "first");

        let batch = [a, b];
        let ordered = display_order(&batch);
        assert_eq!(ordered[0].index, 3);
        assert_eq!(ordered[1].index, 8);
    }

    #[test]
    fn test_output_is_deterministic_across_input_orders() {
        let tasks = vec![
            due_at(make_task(4, "Work", "w1"), 2026, 9, 3),
            make_task(12, "Inbox", "i2"),
            done_at(make_task(7, "Inbox", "i1"), 2026, 8, 1),
            make_task(2, "Work", "w2"),
        ];
        let mut shuffled = tasks.clone();
        shuffled.rotate_left(2);
        shuffled.swap(0, 3);

        assert_eq!(plain_lines(&tasks), plain_lines(&shuffled));
    }

    #[test]
    fn test_no_priority_filler_row() {
        let tasks = vec![make_task(1, "Inbox", "call mom")];
        let lines = plain_lines(&tasks);

        assert_eq!(lines[1], "1| |    | call mom");
    }

    #[test]
    fn test_priority_marker_row() {
        let mut task = make_task(1, "Inbox", "urgent");
        task.priority = 2;
        let lines = plain_lines(&[task]);

        assert_eq!(lines[1], "1| (2)| | urgent");
    }

    #[test]
    fn test_active_row_with_due_date() {
        let task = due_at(make_task(1, "Inbox", "pay rent"), 2026, 9, 1);
        let lines = plain_lines(&[task]);

        assert_eq!(lines[1], "1| |    | pay rent | 2026-09-01");
    }

    #[test]
    fn test_done_row_with_notes_and_tag() {
        let mut task = done_at(make_task(1, "Inbox", "ship package"), 2026, 8, 20);
        task.notes = vec!["note one".to_string(), "note two".to_string()];
        task.tags = vec!["errand".to_string()];
        let lines = plain_lines(&[task]);

        assert_eq!(lines[1], "1|  x   | ship package** #errand x 2026-08-20");
    }

    #[test]
    fn test_name_column_aligns_across_states() {
        let mut urgent = make_task(1, "Inbox", "urgent");
        urgent.priority = 3;
        let plainer = make_task(2, "Inbox", "plain");
        let finished = done_at(make_task(3, "Inbox", "finished"), 2026, 8, 1);

        let lines = plain_lines(&[urgent, plainer, finished]);
        let name_cols: Vec<usize> = lines[1..]
            .iter()
            .map(|l| l.rfind("| ").map(|i| i + 2).unwrap_or(0))
            .collect();

        assert_eq!(name_cols, vec![name_cols[0]; 3]);
    }

    #[test]
    fn test_state_exclusivity() {
        let active = due_at(make_task(1, "Inbox", "active"), 2026, 9, 1);
        let mut finished = done_at(make_task(2, "Inbox", "finished"), 2026, 8, 1);
        finished.priority = 3;
        finished.due = Some(Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap());

        let lines = plain_lines(&[active, finished]);

        // The active row shows a due segment, never a completion glyph.
        assert!(lines[1].contains("| 2026-09-01"));
        assert!(!lines[1].contains(" x "));
        // The done row shows neither its priority marker nor its due date.
        assert!(!lines[2].contains("(3)"));
        assert!(!lines[2].contains("2026-07-01"));
        assert!(lines[2].contains(" x 2026-08-01"));
    }

    #[test]
    fn test_tags_render_after_notes() {
        let mut task = make_task(1, "Inbox", "plan trip");
        task.notes = vec!["hotel".to_string()];
        task.tags = vec!["travel".to_string(), "family".to_string()];
        let lines = plain_lines(&[task]);

        assert_eq!(lines[1], "1| |    | plan trip* #travel #family");
    }

    #[test]
    fn test_lists_appear_in_ascending_name_order() {
        let tasks = vec![
            make_task(1, "Work", "w"),
            make_task(2, "Errands", "e"),
            make_task(3, "Inbox", "i"),
        ];
        let lines = plain_lines(&tasks);
        let headers: Vec<&str> = lines
            .iter()
            .map(|l| l.as_str())
            .filter(|l| l.starts_with("  "))
            .collect();

        assert_eq!(headers, vec!["  Errands", "  Inbox", "  Work"]);
    }
}

use crate::session::Session;
use crate::tasks::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};
use crate::types::Task;
use crate::ui::Page;
use crate::views::shared::{ErrorBanner, Spinner, format_short_date, redirect_if_unauthorized, today};
use dioxus::prelude::*;
use time::{Date, Month, util};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Cells for a Sunday-first month grid: leading blanks up to the first
/// weekday, then one cell per day.
pub fn month_grid(year: i32, month: Month) -> Vec<Option<Date>> {
    let Ok(first) = Date::from_calendar_date(year, month, 1) else {
        return Vec::new();
    };
    let leading = first.weekday().number_days_from_sunday() as usize;
    let mut cells: Vec<Option<Date>> = vec![None; leading];
    for day in 1..=util::days_in_year_month(year, month) {
        cells.push(Date::from_calendar_date(year, month, day).ok());
    }
    cells
}

pub fn previous_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::January => (year - 1, Month::December),
        other => (year, other.previous()),
    }
}

pub fn next_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::December => (year + 1, Month::January),
        other => (year, other.next()),
    }
}

#[component]
pub fn CalendarView() -> Element {
    let session = use_context::<Session>();
    let page = use_context::<Signal<Page>>();

    let mut tasks = use_signal(Vec::<Task>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);

    let current_day = today();
    let mut cursor = use_signal(|| (current_day.year(), current_day.month()));
    let mut selected = use_signal(|| Option::<Date>::None);

    {
        let api = session.api();
        use_effect(move || {
            let api = api.clone();
            spawn(async move {
                loading.set(true);
                match api.list_tasks(None, DEFAULT_PAGE, DEFAULT_PAGE_LIMIT).await {
                    Ok(all) => tasks.set(all),
                    Err(err) => {
                        if !redirect_if_unauthorized(&err, page) {
                            error.set(Some(err.to_string()));
                        }
                    }
                }
                loading.set(false);
            });
        });
    }

    let (year, month) = cursor();
    let cells = month_grid(year, month);
    let all_tasks = tasks();
    let selected_day = selected();

    rsx! {
        div { class: "main-container",
            h2 { class: "page-title", "Calendar" }
            if let Some(message) = error() {
                ErrorBanner { message }
            }
            if loading() {
                Spinner {}
            } else {
                div { class: "calendar-layout",
                    div { class: "calendar-card",
                        div { class: "calendar-nav",
                            button {
                                class: "btn btn-ghost",
                                aria_label: "Previous month",
                                onclick: move |_| {
                                    let (y, m) = cursor();
                                    cursor.set(previous_month(y, m));
                                },
                                "←"
                            }
                            h3 { class: "calendar-month", "{month} {year}" }
                            button {
                                class: "btn btn-ghost",
                                aria_label: "Next month",
                                onclick: move |_| {
                                    let (y, m) = cursor();
                                    cursor.set(next_month(y, m));
                                },
                                "→"
                            }
                        }
                        div { class: "weekday-row",
                            for name in WEEKDAYS {
                                div { class: "weekday", "{name}" }
                            }
                        }
                        div { class: "calendar-grid",
                            for (index, cell) in cells.iter().copied().enumerate() {
                                if let Some(date) = cell {
                                    DayCell {
                                        key: "{year}-{month}-{index}",
                                        date,
                                        is_today: date == current_day,
                                        is_selected: selected_day == Some(date),
                                        due_tasks: tasks_for_date(&all_tasks, date),
                                        selected,
                                    }
                                } else {
                                    div { key: "{year}-{month}-{index}", class: "day-cell blank" }
                                }
                            }
                        }
                    }
                    div { class: "calendar-card",
                        DayPanel { selected, tasks: selected_day.map(|d| tasks_for_date(&all_tasks, d)).unwrap_or_default() }
                    }
                }
            }
        }
    }
}

fn tasks_for_date(tasks: &[Task], date: Date) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.due_date == Some(date))
        .cloned()
        .collect()
}

#[component]
fn DayCell(
    date: Date,
    is_today: bool,
    is_selected: bool,
    due_tasks: Vec<Task>,
    selected: Signal<Option<Date>>,
) -> Element {
    let mut selected = selected;
    let mut class = String::from("day-cell");
    if is_today {
        class.push_str(" today");
    }
    if is_selected {
        class.push_str(" selected");
    }
    rsx! {
        button {
            class: "{class}",
            onclick: move |_| selected.set(Some(date)),
            div { class: "day-number", "{date.day()}" }
            if !due_tasks.is_empty() {
                div { class: "day-dots",
                    for task in due_tasks.iter().take(4) {
                        span {
                            class: if task.completed { "day-dot done" } else { "day-dot" },
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn DayPanel(selected: Signal<Option<Date>>, tasks: Vec<Task>) -> Element {
    let Some(date) = selected() else {
        return rsx! {
            p { class: "text-muted", "Select a day to see its tasks." }
        };
    };
    rsx! {
        h3 { class: "day-panel-title", "{format_short_date(date)}" }
        if tasks.is_empty() {
            p { class: "text-muted", "No tasks due this day." }
        } else {
            for task in tasks.iter() {
                div {
                    key: "{task.id}",
                    class: if task.completed { "day-task completed" } else { "day-task" },
                    "{task.title}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_starts_on_the_first_weekday() {
        // February 2026 begins on a Sunday: no leading blanks, 28 days.
        let cells = month_grid(2026, Month::February);
        assert_eq!(cells.len(), 28);
        assert!(cells[0].is_some());

        // August 2026 begins on a Saturday: six leading blanks.
        let cells = month_grid(2026, Month::August);
        assert_eq!(cells.len(), 6 + 31);
        assert!(cells[..6].iter().all(Option::is_none));
        assert_eq!(cells[6], Date::from_calendar_date(2026, Month::August, 1).ok());
    }

    #[test]
    fn grid_handles_leap_years() {
        let cells = month_grid(2024, Month::February);
        let days = cells.iter().filter(|cell| cell.is_some()).count();
        assert_eq!(days, 29);
    }

    #[test]
    fn month_navigation_wraps_at_year_boundaries() {
        assert_eq!(previous_month(2026, Month::January), (2025, Month::December));
        assert_eq!(next_month(2025, Month::December), (2026, Month::January));
        assert_eq!(next_month(2026, Month::March), (2026, Month::April));
    }
}

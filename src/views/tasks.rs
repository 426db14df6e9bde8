use crate::session::Session;
use crate::tasks::{TasksState, use_tasks};
use crate::types::{Priority, Task, TaskCreate, TaskFilter, TaskUpdate};
use crate::ui::Page;
use crate::views::shared::{ErrorBanner, Spinner, format_short_date, redirect_if_unauthorized};
use dioxus::events::{FormEvent, Key};
use dioxus::prelude::*;
use time::{Date, macros::format_description};

const MAX_TITLE_LEN: usize = 500;
const MAX_DESCRIPTION_LEN: usize = 1000;
const MAX_CATEGORY_LEN: usize = 100;

const DATE_INPUT_FORMAT: &[time::format_description::FormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

#[component]
pub fn TasksView() -> Element {
    let session = use_context::<Session>();
    let page = use_context::<Signal<Page>>();
    let state = use_tasks(session.api(), page);

    let tasks = (state.tasks)();
    let loading = (state.loading)();

    rsx! {
        div { class: "main-container",
            h2 { class: "page-title", "My Tasks" }
            if let Some(message) = (state.error)() {
                ErrorBanner { message }
            }
            TaskForm { state }
            FilterBar { filter: state.filter }
            if loading {
                Spinner {}
            } else if tasks.is_empty() {
                div { class: "empty-state",
                    p { "Nothing here yet." }
                    p { class: "text-muted", "Add a task above, or ask the AI assistant to plan your day." }
                }
            } else {
                div { class: "task-list",
                    for task in tasks.iter().cloned() {
                        TaskRow { key: "{task.id}", state, task }
                    }
                }
            }
        }
    }
}

#[component]
fn FilterBar(filter: Signal<TaskFilter>) -> Element {
    rsx! {
        div { class: "filter-bar",
            FilterButton { filter, option: TaskFilter::All }
            FilterButton { filter, option: TaskFilter::Active }
            FilterButton { filter, option: TaskFilter::Completed }
        }
    }
}

#[component]
fn FilterButton(filter: Signal<TaskFilter>, option: TaskFilter) -> Element {
    let mut filter = filter;
    let class = if filter() == option {
        "filter-btn active"
    } else {
        "filter-btn"
    };
    rsx! {
        button {
            class: "{class}",
            onclick: move |_| filter.set(option),
            "{option.label()}"
        }
    }
}

#[component]
fn TaskForm(state: TasksState) -> Element {
    let session = use_context::<Session>();
    let page = use_context::<Signal<Page>>();

    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut priority = use_signal(|| "medium".to_string());
    let mut due_date = use_signal(String::new);
    let mut category = use_signal(String::new);
    let mut form_error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let api = session.api();
    let submit = move |ev: FormEvent| {
        ev.prevent_default();
        if submitting() {
            return;
        }

        let trimmed_title = title().trim().to_string();
        if trimmed_title.is_empty() {
            form_error.set(Some("Task title cannot be empty".to_string()));
            return;
        }
        if trimmed_title.len() > MAX_TITLE_LEN {
            form_error.set(Some(format!(
                "Task title is too long (max {MAX_TITLE_LEN} characters)"
            )));
            return;
        }
        let description_value = description().trim().to_string();
        if description_value.len() > MAX_DESCRIPTION_LEN {
            form_error.set(Some(format!(
                "Description is too long (max {MAX_DESCRIPTION_LEN} characters)"
            )));
            return;
        }
        let category_value = category().trim().to_string();
        if category_value.len() > MAX_CATEGORY_LEN {
            form_error.set(Some(format!(
                "Category is too long (max {MAX_CATEGORY_LEN} characters)"
            )));
            return;
        }

        let data = TaskCreate {
            title: trimmed_title,
            description: (!description_value.is_empty()).then_some(description_value),
            priority: Priority::parse(&priority()),
            due_date: Date::parse(&due_date(), DATE_INPUT_FORMAT).ok(),
            category: (!category_value.is_empty()).then_some(category_value),
        };

        submitting.set(true);
        form_error.set(None);
        let api = api.clone();
        spawn(async move {
            match state.create(&api, data).await {
                Ok(()) => {
                    // Success clears the form; a failure keeps the input so
                    // the user can fix and resubmit.
                    title.set(String::new());
                    description.set(String::new());
                    priority.set("medium".to_string());
                    due_date.set(String::new());
                    category.set(String::new());
                }
                Err(err) => {
                    redirect_if_unauthorized(&err, page);
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        form { class: "task-form", onsubmit: submit,
            if let Some(message) = form_error() {
                ErrorBanner { message }
            }
            div { class: "field",
                input {
                    placeholder: "Task title *",
                    maxlength: "{MAX_TITLE_LEN}",
                    value: "{title}",
                    oninput: move |ev| title.set(ev.value()),
                }
            }
            div { class: "field",
                textarea {
                    placeholder: "Description (optional)",
                    rows: "2",
                    maxlength: "{MAX_DESCRIPTION_LEN}",
                    value: "{description}",
                    oninput: move |ev| description.set(ev.value()),
                }
            }
            div { class: "form-row",
                div { class: "field",
                    label { r#for: "task-priority", "Priority" }
                    select {
                        id: "task-priority",
                        value: "{priority}",
                        onchange: move |ev| priority.set(ev.value()),
                        option { value: "low", "Low" }
                        option { value: "medium", "Medium" }
                        option { value: "high", "High" }
                    }
                }
                div { class: "field",
                    label { r#for: "task-due", "Due date" }
                    input {
                        id: "task-due",
                        r#type: "date",
                        value: "{due_date}",
                        oninput: move |ev| due_date.set(ev.value()),
                    }
                }
                div { class: "field",
                    label { r#for: "task-category", "Category" }
                    input {
                        id: "task-category",
                        placeholder: "e.g. work",
                        maxlength: "{MAX_CATEGORY_LEN}",
                        value: "{category}",
                        oninput: move |ev| category.set(ev.value()),
                    }
                }
            }
            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: submitting() || title().trim().is_empty(),
                "Add Task"
            }
        }
    }
}

#[component]
fn TaskRow(state: TasksState, task: Task) -> Element {
    let session = use_context::<Session>();
    let page = use_context::<Signal<Page>>();

    let mut editing = use_signal(|| false);
    let mut draft_title = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let task_id = task.id;
    let api = session.api();

    let toggle_api = api.clone();
    let on_toggle = move |_| {
        if busy() {
            return;
        }
        busy.set(true);
        let api = toggle_api.clone();
        spawn(async move {
            if let Err(err) = state.toggle(&api, task_id).await {
                redirect_if_unauthorized(&err, page);
            }
            busy.set(false);
        });
    };

    let delete_api = api.clone();
    let on_delete = move |_| {
        if busy() {
            return;
        }
        busy.set(true);
        let api = delete_api.clone();
        spawn(async move {
            if let Err(err) = state.delete(&api, task_id).await {
                redirect_if_unauthorized(&err, page);
            }
            busy.set(false);
        });
    };

    let current_title = task.title.clone();
    let start_edit = move |_| {
        draft_title.set(current_title.clone());
        editing.set(true);
    };

    let save_api = api.clone();
    let save_edit = move || {
        let new_title = draft_title().trim().to_string();
        if new_title.is_empty() || new_title.len() > MAX_TITLE_LEN {
            editing.set(false);
            return;
        }
        busy.set(true);
        let api = save_api.clone();
        spawn(async move {
            let patch = TaskUpdate {
                title: Some(new_title),
                ..TaskUpdate::default()
            };
            if let Err(err) = state.update(&api, task_id, patch).await {
                redirect_if_unauthorized(&err, page);
            }
            editing.set(false);
            busy.set(false);
        });
    };

    let row_class = if task.completed {
        "task-row completed"
    } else {
        "task-row"
    };

    rsx! {
        div { class: "{row_class}",
            input {
                class: "task-check",
                r#type: "checkbox",
                checked: task.completed,
                disabled: busy(),
                oninput: on_toggle,
            }
            div { class: "task-body",
                if editing() {
                    input {
                        class: "task-title-input",
                        value: "{draft_title}",
                        autofocus: true,
                        oninput: move |ev| draft_title.set(ev.value()),
                        onkeydown: {
                            let mut save_edit = save_edit.clone();
                            move |ev: Event<KeyboardData>| {
                                if ev.key() == Key::Enter {
                                    ev.prevent_default();
                                    save_edit();
                                } else if ev.key() == Key::Escape {
                                    editing.set(false);
                                }
                            }
                        },
                    }
                } else {
                    div { class: "task-title", "{task.title}" }
                }
                if let Some(description) = task.description.as_ref() {
                    p { class: "task-desc", "{description}" }
                }
                TaskBadges { task: task.clone() }
            }
            div { class: "task-actions",
                if editing() {
                    button {
                        class: "action-btn",
                        disabled: busy(),
                        onclick: {
                            let mut save_edit = save_edit.clone();
                            move |_| save_edit()
                        },
                        "Save"
                    }
                } else {
                    button {
                        class: "action-btn",
                        disabled: busy(),
                        onclick: start_edit,
                        "Edit"
                    }
                }
                button {
                    class: "action-btn",
                    disabled: busy(),
                    onclick: on_delete,
                    "Delete"
                }
            }
        }
    }
}

#[component]
fn TaskBadges(task: Task) -> Element {
    let has_badges =
        task.priority.is_some() || task.due_date.is_some() || task.category.is_some();
    if !has_badges {
        return rsx! {};
    }
    rsx! {
        div { class: "task-badges",
            if let Some(priority) = task.priority {
                span { class: "{priority.badge_class()}", "{priority.label()}" }
            }
            if let Some(due) = task.due_date {
                span { class: "badge badge-due", "Due {format_short_date(due)}" }
            }
            if let Some(category) = task.category.as_ref() {
                span { class: "badge badge-category", "{category}" }
            }
        }
    }
}

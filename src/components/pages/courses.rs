//! Course management.

use leptos::prelude::*;

use super::{PageHeader, css, filter_pair, parse_number, reconcile, report_invalid, run_export};
use crate::app::AppContext;
use crate::components::builders::{
    ActionButton, Badge, DataTable, EmptyState, IconButton, Modal, ProgressBar, StatCard,
    SubViewTabs, Tone,
};
use crate::components::icons as ic;
use crate::core::OptimisticList;
use crate::core::validation;
use crate::models::{
    Course, CourseDraft, CourseFilter, CourseLevel, CourseStats, CourseStatus, ExportFormat,
    ExportKind, ListView, ViewState, categories,
};
use crate::utils::dom;
use crate::utils::format::{DateStyle, format_date, format_number};

#[derive(Debug, Clone, PartialEq)]
enum Editing {
    New,
    Existing(Course),
}

fn status_tone(status: CourseStatus) -> Tone {
    match status {
        CourseStatus::Published => Tone::Success,
        CourseStatus::Draft => Tone::Warning,
        CourseStatus::Archived => Tone::Neutral,
    }
}

fn level_tone(level: CourseLevel) -> Tone {
    match level {
        CourseLevel::Beginner => Tone::Info,
        CourseLevel::Intermediate => Tone::Warning,
        CourseLevel::Advanced => Tone::Danger,
    }
}

#[component]
pub fn CoursesPage(courses: Vec<Course>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let list = RwSignal::new(OptimisticList::new(courses));
    let filter = RwSignal::new(CourseFilter::default());
    let view_state = RwSignal::new(ViewState::<ListView>::default());
    let selected = RwSignal::new(None::<String>);
    let editing = RwSignal::new(None::<Editing>);
    let deleting = RwSignal::new(None::<Course>);

    let stats = Memo::new(move |_| list.with(|l| CourseStats::from_courses(l.items())));
    let category_counts = Memo::new(move |_| list.with(|l| categories(l.items())));

    let export = Callback::new(move |_: ()| {
        let filters = filter.with_untracked(|f| {
            [
                filter_pair("category", f.category.as_deref().unwrap_or_default()),
                filter_pair("status", f.status.map(CourseStatus::as_str).unwrap_or_default()),
                filter_pair("level", f.level.map(CourseLevel::as_str).unwrap_or_default()),
                filter_pair("search", f.query.trim()),
            ]
            .into_iter()
            .flatten()
            .collect()
        });
        run_export(ctx, ExportKind::Courses, ExportFormat::Csv, filters, "course");
    });

    let on_view = Callback::new(move |id: String| selected.set(Some(id)));
    let on_edit = Callback::new(move |course: Course| editing.set(Some(Editing::Existing(course))));
    let on_delete = Callback::new(move |course: Course| deleting.set(Some(course)));

    let visible = Memo::new(move |_| {
        filter.with(|f| list.with(|l| f.apply(l.items()).into_iter().cloned().collect::<Vec<_>>()))
    });

    let content = move || {
        let courses = visible.get();
        if courses.is_empty() {
            return view! { <EmptyState message="No courses match the current filters" /> }.into_any();
        }
        match view_state.with(|s| s.current) {
            ListView::Cards => view! {
                <div class=css::cardGrid>
                    {courses
                        .into_iter()
                        .map(|course| view! {
                            <CourseCard course=course on_view=on_view on_edit=on_edit on_delete=on_delete />
                        })
                        .collect_view()}
                </div>
            }
            .into_any(),
            ListView::Table => view! {
                <CourseTable courses=courses on_view=on_view on_edit=on_edit on_delete=on_delete />
            }
            .into_any(),
        }
    };

    let detail = move || {
        selected
            .get()
            .and_then(|id| list.with(|l| l.get(&id).cloned()))
            .map(|course| {
                view! {
                    <CourseDetail course=course on_close=Callback::new(move |_: ()| selected.set(None)) />
                }
            })
    };
    let editor = move || {
        editing.get().map(|target| {
            view! {
                <CourseEditor
                    target=target
                    categories=category_counts.get_untracked().into_iter().map(|(c, _)| c).collect()
                    on_close=Callback::new(move |_: ()| editing.set(None))
                    on_save=Callback::new(move |(target, draft): (Editing, CourseDraft)| {
                        editing.set(None);
                        save_course(ctx, list, target, draft);
                    })
                />
            }
        })
    };
    let confirm = move || {
        deleting.get().map(|course| {
            let close = Callback::new(move |_: ()| deleting.set(None));
            let message = format!(
                "Are you sure you want to delete \"{}\"? Enrolled students will lose access.",
                course.title
            );
            view! {
                <Modal title="Delete Course" on_close=close>
                    <p>{message}</p>
                    <div class=css::formActions>
                        <ActionButton label="Cancel" icon=ic::CLOSE on_click=close />
                        <ActionButton
                            label="Delete"
                            icon=ic::DELETE
                            primary=true
                            on_click=Callback::new(move |_: ()| {
                                deleting.set(None);
                                delete_course(ctx, list, course.clone());
                            })
                        />
                    </div>
                </Modal>
            }
        })
    };

    view! {
        <PageHeader title="Course Management" subtitle="Create, publish and track courses.">
            <ActionButton label="Export" icon=ic::DOWNLOAD on_click=export />
            <ActionButton
                label="New Course"
                icon=ic::PLUS
                primary=true
                on_click=Callback::new(move |_: ()| editing.set(Some(Editing::New)))
            />
        </PageHeader>

        <div class=css::statsGrid>
            <StatCard
                label="Published"
                value=Signal::derive(move || stats.with(|s| s.published.to_string()))
                icon=ic::SUCCESS
                detail=stats.with_untracked(|s| format!("{} total", s.total))
            />
            <StatCard
                label="Drafts"
                value=Signal::derive(move || stats.with(|s| s.drafts.to_string()))
                icon=ic::EDIT
            />
            <StatCard
                label="Total Students"
                value=Signal::derive(move || stats.with(|s| format_number(s.total_students)))
                icon=ic::USERS
            />
            <StatCard
                label="Average Rating"
                value=Signal::derive(move || stats.with(|s| format!("{:.1}", s.average_rating)))
                icon=ic::TREND_UP
                detail="Published courses"
            />
        </div>

        <CourseFilters filter=filter categories=category_counts />
        <SubViewTabs state=view_state />
        {content}
        {detail}
        {editor}
        {confirm}
    }
}

fn save_course(
    ctx: AppContext,
    list: RwSignal<OptimisticList<Course>>,
    target: Editing,
    draft: CourseDraft,
) {
    let Some(api) = ctx.api() else {
        return;
    };
    let title = draft.title.clone();
    let now = dom::now_iso();
    match target {
        Editing::New => {
            let local = draft
                .clone()
                .into_course(format!("course_{}", dom::now_ms() as u64), &now);
            let Some(op) = list.try_update(|l| l.apply_create(local)) else {
                return;
            };
            reconcile(
                ctx,
                list,
                op,
                async move { api.create_course(&draft).await.into_optional() },
                format!("Course \"{}\" created successfully", title),
                format!("Failed to create course \"{}\"", title),
            );
        }
        Editing::Existing(course) => {
            let updated = draft.apply_to(&course, &now);
            let Some(op) = list.try_update(|l| l.apply_update(updated)).flatten() else {
                return;
            };
            reconcile(
                ctx,
                list,
                op,
                async move { api.update_course(&course.id, &draft).await.into_optional() },
                format!("Course \"{}\" updated successfully", title),
                format!("Failed to update course \"{}\"", title),
            );
        }
    }
}

fn delete_course(ctx: AppContext, list: RwSignal<OptimisticList<Course>>, course: Course) {
    let Some(api) = ctx.api() else {
        return;
    };
    let Some(op) = list.try_update(|l| l.apply_delete(&course.id)).flatten() else {
        return;
    };
    reconcile(
        ctx,
        list,
        op,
        async move { api.delete_course(&course.id).await.into_optional().map(|_| None) },
        format!("Course \"{}\" deleted successfully", course.title),
        format!("Failed to delete course \"{}\"", course.title),
    );
}

#[component]
fn CourseFilters(
    filter: RwSignal<CourseFilter>,
    categories: Memo<Vec<(String, usize)>>,
) -> impl IntoView {
    let category_options = move || {
        categories
            .get()
            .into_iter()
            .map(|(name, count)| {
                let label = format!("{} ({})", name, count);
                view! { <option value=name>{label}</option> }
            })
            .collect_view()
    };

    view! {
        <div class=css::toolbar>
            <input
                class=css::search
                type="search"
                placeholder="Search by title or instructor..."
                on:input=move |ev| filter.update(|f| f.query = event_target_value(&ev))
            />
            <select
                class=css::select
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    filter.update(|f| f.category = (!value.is_empty()).then_some(value));
                }
            >
                <option value="">"All Categories"</option>
                {category_options}
            </select>
            <select
                class=css::select
                on:change=move |ev| filter.update(|f| f.status = CourseStatus::parse(&event_target_value(&ev)))
            >
                <option value="">"All Statuses"</option>
                {CourseStatus::ALL
                    .into_iter()
                    .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                    .collect_view()}
            </select>
            <select
                class=css::select
                on:change=move |ev| filter.update(|f| f.level = CourseLevel::parse(&event_target_value(&ev)))
            >
                <option value="">"All Levels"</option>
                {CourseLevel::ALL
                    .into_iter()
                    .map(|l| view! { <option value=l.as_str()>{l.as_str()}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}

#[component]
fn CourseCard(
    course: Course,
    on_view: Callback<String>,
    on_edit: Callback<Course>,
    on_delete: Callback<Course>,
) -> impl IntoView {
    let id = course.id.clone();
    let for_edit = course.clone();
    let for_delete = course.clone();
    let tags = course
        .tags
        .iter()
        .map(|t| view! { <span class=css::tag>{t.clone()}</span> })
        .collect_view();

    view! {
        <article class=css::card>
            <div class=css::cardHeader>
                <span class=css::avatar>{course.thumbnail.clone()}</span>
                <div class=css::listBody>
                    <h4 class=css::cardTitle>{course.title.clone()}</h4>
                    <span class=css::muted>{course.instructor.clone()}</span>
                </div>
            </div>
            <div class=css::tags>
                <Badge text=course.status.as_str() tone=status_tone(course.status) />
                <Badge text=course.level.as_str() tone=level_tone(course.level) />
                {tags}
            </div>
            <div class=css::cardMeta>
                <span>{format!("{} students", format_number(u64::from(course.enrolled_students)))}</span>
                <span>{format!("{} lessons", course.total_lessons)}</span>
                <span>{course.duration.clone()}</span>
                <span>{format!("{:.1} ({} reviews)", course.rating, course.reviews)}</span>
            </div>
            <ProgressBar value=f64::from(course.completion_rate) tone=Tone::Info show_label=true />
            <div class=css::cardActions>
                <IconButton title="View" icon=ic::VIEW on_click=Callback::new(move |_: ()| on_view.run(id.clone())) />
                <IconButton title="Edit" icon=ic::EDIT on_click=Callback::new(move |_: ()| on_edit.run(for_edit.clone())) />
                <IconButton title="Delete" icon=ic::DELETE on_click=Callback::new(move |_: ()| on_delete.run(for_delete.clone())) />
            </div>
        </article>
    }
}

#[component]
fn CourseTable(
    courses: Vec<Course>,
    on_view: Callback<String>,
    on_edit: Callback<Course>,
    on_delete: Callback<Course>,
) -> impl IntoView {
    let rows = courses
        .into_iter()
        .map(|course| {
            let id = course.id.clone();
            let for_edit = course.clone();
            let for_delete = course.clone();
            view! {
                <tr>
                    <td>{course.title.clone()}</td>
                    <td>{course.instructor.clone()}</td>
                    <td>{course.category.clone()}</td>
                    <td><Badge text=course.status.as_str() tone=status_tone(course.status) /></td>
                    <td>{format_number(u64::from(course.enrolled_students))}</td>
                    <td><ProgressBar value=f64::from(course.completion_rate) tone=Tone::Info show_label=true /></td>
                    <td>{format!("{:.1}", course.rating)}</td>
                    <td>
                        <IconButton title="View" icon=ic::VIEW on_click=Callback::new(move |_: ()| on_view.run(id.clone())) />
                        <IconButton title="Edit" icon=ic::EDIT on_click=Callback::new(move |_: ()| on_edit.run(for_edit.clone())) />
                        <IconButton title="Delete" icon=ic::DELETE on_click=Callback::new(move |_: ()| on_delete.run(for_delete.clone())) />
                    </td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <DataTable headers=vec![
            "Title", "Instructor", "Category", "Status", "Students", "Completion", "Rating", "Actions",
        ]>
            {rows}
        </DataTable>
    }
}

#[component]
fn CourseDetail(course: Course, on_close: Callback<()>) -> impl IntoView {
    let bullets = |items: Vec<String>| {
        items
            .into_iter()
            .map(|i| view! { <li>{i}</li> })
            .collect_view()
    };

    view! {
        <Modal title=course.title.clone() on_close=on_close>
            <p>{course.description.clone()}</p>
            <div class=css::detailGrid>
                <span class=css::detailLabel>"Instructor"</span>
                <span>{course.instructor.clone()}</span>
                <span class=css::detailLabel>"Category"</span>
                <span>{course.category.clone()}</span>
                <span class=css::detailLabel>"Level"</span>
                <span>{course.level.as_str()}</span>
                <span class=css::detailLabel>"Status"</span>
                <span>{course.status.as_str()}</span>
                <span class=css::detailLabel>"Duration"</span>
                <span>{format!("{} ({} lessons)", course.duration, course.total_lessons)}</span>
                <span class=css::detailLabel>"Enrolled"</span>
                <span>{format_number(u64::from(course.enrolled_students))}</span>
                <span class=css::detailLabel>"Completion"</span>
                <span>{format!("{}%", course.completion_rate)}</span>
                <span class=css::detailLabel>"Rating"</span>
                <span>{format!("{:.1} ({} reviews)", course.rating, course.reviews)}</span>
                <span class=css::detailLabel>"Price"</span>
                <span>{course.price.clone()}</span>
                <span class=css::detailLabel>"Language"</span>
                <span>{course.language.clone()}</span>
                <span class=css::detailLabel>"Created"</span>
                <span>{format_date(&course.created_date, DateStyle::Long)}</span>
                <span class=css::detailLabel>"Updated"</span>
                <span>{format_date(&course.last_updated, DateStyle::Long)}</span>
            </div>
            <h4>"Prerequisites"</h4>
            <ul>{bullets(course.prerequisites.clone())}</ul>
            <h4>"Learning outcomes"</h4>
            <ul>{bullets(course.learning_outcomes.clone())}</ul>
        </Modal>
    }
}

#[component]
fn CourseEditor(
    target: Editing,
    categories: Vec<String>,
    on_close: Callback<()>,
    on_save: Callback<(Editing, CourseDraft)>,
) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let initial = match &target {
        Editing::Existing(course) => Some(CourseDraft::from_course(course)),
        Editing::New => None,
    };
    let title_text = if initial.is_some() { "Edit Course" } else { "Create Course" };
    let field = |f: fn(&CourseDraft) -> String| RwSignal::new(initial.as_ref().map(f).unwrap_or_default());

    let title = field(|d| d.title.clone());
    let description = field(|d| d.description.clone());
    let instructor = field(|d| d.instructor.clone());
    let category = field(|d| d.category.clone());
    let duration = field(|d| d.duration.clone());
    let lessons = field(|d| d.total_lessons.to_string());
    let level = RwSignal::new(initial.as_ref().map(|d| d.level).unwrap_or(CourseLevel::Beginner));
    let status = RwSignal::new(initial.as_ref().map(|d| d.status).unwrap_or(CourseStatus::Draft));
    let error = RwSignal::new(None::<String>);
    let target = StoredValue::new(target);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = CourseDraft {
            title: title.get_untracked().trim().to_string(),
            description: description.get_untracked().trim().to_string(),
            instructor: instructor.get_untracked().trim().to_string(),
            category: category.get_untracked().trim().to_string(),
            level: level.get_untracked(),
            status: status.get_untracked(),
            duration: duration.get_untracked().trim().to_string(),
            total_lessons: parse_number(&lessons.get_untracked()).unwrap_or(0),
        };
        match validation::validate_course(&draft) {
            Ok(()) => on_save.run((target.get_value(), draft)),
            Err(e) => {
                report_invalid(ctx, &e);
                error.set(Some(e.to_string()));
            }
        }
    };

    let category_options = categories
        .into_iter()
        .map(|c| view! { <option value=c.clone()></option> })
        .collect_view();

    view! {
        <Modal title=title_text on_close=on_close>
            <form class=css::form on:submit=submit>
                {move || error.get().map(|e| view! { <p class=css::formError>{e}</p> })}
                <label class=css::field>
                    "Title *"
                    <input class=css::input type="text" bind:value=title />
                </label>
                <label class=css::field>
                    "Description *"
                    <textarea class=css::input rows="3" bind:value=description></textarea>
                </label>
                <div class=css::fieldRow>
                    <label class=css::field>
                        "Instructor *"
                        <input class=css::input type="text" bind:value=instructor />
                    </label>
                    <label class=css::field>
                        "Category *"
                        <input class=css::input type="text" list="course-categories" bind:value=category />
                        <datalist id="course-categories">{category_options}</datalist>
                    </label>
                </div>
                <div class=css::fieldRow>
                    <label class=css::field>
                        "Level"
                        <select
                            class=css::select
                            on:change=move |ev| {
                                if let Some(l) = CourseLevel::parse(&event_target_value(&ev)) {
                                    level.set(l);
                                }
                            }
                        >
                            {CourseLevel::ALL
                                .into_iter()
                                .map(|l| view! {
                                    <option value=l.as_str() selected=move || level.get() == l>{l.as_str()}</option>
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <label class=css::field>
                        "Status"
                        <select
                            class=css::select
                            on:change=move |ev| {
                                if let Some(s) = CourseStatus::parse(&event_target_value(&ev)) {
                                    status.set(s);
                                }
                            }
                        >
                            {CourseStatus::ALL
                                .into_iter()
                                .map(|s| view! {
                                    <option value=s.as_str() selected=move || status.get() == s>{s.as_str()}</option>
                                })
                                .collect_view()}
                        </select>
                    </label>
                </div>
                <div class=css::fieldRow>
                    <label class=css::field>
                        "Duration *"
                        <input class=css::input type="text" placeholder="e.g. 6 weeks" bind:value=duration />
                    </label>
                    <label class=css::field>
                        "Total lessons *"
                        <input class=css::input type="number" min="1" bind:value=lessons />
                    </label>
                </div>
                <div class=css::formActions>
                    <ActionButton label="Cancel" icon=ic::CLOSE on_click=on_close />
                    <button class=css::submit type="submit">"Save Course"</button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tones() {
        assert_eq!(status_tone(CourseStatus::Published), Tone::Success);
        assert_eq!(status_tone(CourseStatus::Draft), Tone::Warning);
        assert_eq!(status_tone(CourseStatus::Archived), Tone::Neutral);
    }

    #[test]
    fn test_level_tones() {
        assert_eq!(level_tone(CourseLevel::Beginner), Tone::Info);
        assert_eq!(level_tone(CourseLevel::Advanced), Tone::Danger);
    }
}

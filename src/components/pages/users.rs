//! User management.
//!
//! Edits go into the local list first and are reconciled when the backend
//! answers; a rejected edit is rolled back.

use leptos::prelude::*;

use super::{PageHeader, css, filter_pair, reconcile, report_invalid, run_export};
use crate::app::AppContext;
use crate::components::builders::{
    ActionButton, Badge, DataTable, EmptyState, IconButton, Modal, StatCard, SubViewTabs, Tone,
};
use crate::components::icons as ic;
use crate::core::validation;
use crate::core::OptimisticList;
use crate::models::{
    ExportFormat, ExportKind, ListView, User, UserDraft, UserFilter, UserRole, UserStats,
    UserStatus, ViewState,
};
use crate::utils::dom;
use crate::utils::format::{DateStyle, format_date, format_number, initials};

/// What the editor modal is working on.
#[derive(Debug, Clone, PartialEq)]
enum Editing {
    New,
    Existing(User),
}

fn role_tone(role: UserRole) -> Tone {
    match role {
        UserRole::Student => Tone::Info,
        UserRole::Educator => Tone::Success,
        UserRole::Administrator => Tone::Warning,
    }
}

fn status_tone(status: UserStatus) -> Tone {
    match status {
        UserStatus::Active => Tone::Success,
        UserStatus::Inactive => Tone::Neutral,
    }
}

#[component]
pub fn UsersPage(users: Vec<User>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let list = RwSignal::new(OptimisticList::new(users));
    let filter = RwSignal::new(UserFilter::default());
    let view_state = RwSignal::new(ViewState::<ListView>::default());
    let selected = RwSignal::new(None::<String>);
    let editing = RwSignal::new(None::<Editing>);
    let deleting = RwSignal::new(None::<User>);

    let stats = Memo::new(move |_| list.with(|l| UserStats::from_users(l.items())));
    let stat = move |f: fn(&UserStats) -> usize| {
        Signal::derive(move || format_number(stats.with(f) as u64))
    };

    let export = Callback::new(move |_: ()| {
        let filters = filter.with_untracked(|f| {
            [
                filter_pair("role", f.role.map(UserRole::as_str).unwrap_or_default()),
                filter_pair("status", f.status.map(UserStatus::as_str).unwrap_or_default()),
                filter_pair("search", f.query.trim()),
            ]
            .into_iter()
            .flatten()
            .collect()
        });
        run_export(ctx, ExportKind::Users, ExportFormat::Csv, filters, "user");
    });

    let on_view = Callback::new(move |id: String| selected.set(Some(id)));
    let on_edit = Callback::new(move |user: User| editing.set(Some(Editing::Existing(user))));
    let on_delete = Callback::new(move |user: User| deleting.set(Some(user)));

    let visible = Memo::new(move |_| {
        filter.with(|f| list.with(|l| f.apply(l.items()).into_iter().cloned().collect::<Vec<_>>()))
    });

    let content = move || {
        let users = visible.get();
        if users.is_empty() {
            return view! { <EmptyState message="No users match the current filters" /> }.into_any();
        }
        match view_state.with(|s| s.current) {
            ListView::Cards => view! {
                <div class=css::cardGrid>
                    {users
                        .into_iter()
                        .map(|user| view! {
                            <UserCard user=user on_view=on_view on_edit=on_edit on_delete=on_delete />
                        })
                        .collect_view()}
                </div>
            }
            .into_any(),
            ListView::Table => view! {
                <UserTable users=users on_view=on_view on_edit=on_edit on_delete=on_delete />
            }
            .into_any(),
        }
    };

    let detail = move || {
        selected
            .get()
            .and_then(|id| list.with(|l| l.get(&id).cloned()))
            .map(|user| {
                view! {
                    <UserDetail user=user on_close=Callback::new(move |_: ()| selected.set(None)) />
                }
            })
    };
    let editor = move || {
        editing.get().map(|target| {
            view! {
                <UserEditor
                    target=target
                    on_close=Callback::new(move |_: ()| editing.set(None))
                    on_save=Callback::new(move |(target, draft): (Editing, UserDraft)| {
                        editing.set(None);
                        save_user(ctx, list, target, draft);
                    })
                />
            }
        })
    };
    let confirm = move || {
        deleting.get().map(|user| {
            let name = user.name.clone();
            let close = Callback::new(move |_: ()| deleting.set(None));
            view! {
                <Modal title="Delete User" on_close=close>
                    <p>{format!("Are you sure you want to delete {}? This cannot be undone.", name)}</p>
                    <div class=css::formActions>
                        <ActionButton label="Cancel" icon=ic::CLOSE on_click=close />
                        <ActionButton
                            label="Delete"
                            icon=ic::DELETE
                            primary=true
                            on_click=Callback::new(move |_: ()| {
                                deleting.set(None);
                                delete_user(ctx, list, user.clone());
                            })
                        />
                    </div>
                </Modal>
            }
        })
    };

    view! {
        <PageHeader title="User Management" subtitle="Manage students, educators and administrators.">
            <ActionButton label="Export" icon=ic::DOWNLOAD on_click=export />
            <ActionButton
                label="Add User"
                icon=ic::PLUS
                primary=true
                on_click=Callback::new(move |_: ()| editing.set(Some(Editing::New)))
            />
        </PageHeader>

        <div class=css::statsGrid>
            <StatCard label="Students" value=stat(|s| s.students) icon=ic::USERS />
            <StatCard label="Educators" value=stat(|s| s.educators) icon=ic::COURSES />
            <StatCard label="Administrators" value=stat(|s| s.administrators) icon=ic::ADMIN />
            <StatCard label="Active Users" value=stat(|s| s.active) icon=ic::ACTIVITY />
        </div>

        <UserFilters filter=filter />
        <SubViewTabs state=view_state />
        {content}
        {detail}
        {editor}
        {confirm}
    }
}

fn save_user(ctx: AppContext, list: RwSignal<OptimisticList<User>>, target: Editing, draft: UserDraft) {
    let Some(api) = ctx.api() else {
        return;
    };
    let name = draft.name.clone();
    match target {
        Editing::New => {
            let local = draft
                .clone()
                .into_user(format!("user_{}", dom::now_ms() as u64), &dom::now_iso());
            let Some(op) = list.try_update(|l| l.apply_create(local)) else {
                return;
            };
            reconcile(
                ctx,
                list,
                op,
                async move { api.create_user(&draft).await.into_optional() },
                format!("User {} created successfully", name),
                format!("Failed to create user {}", name),
            );
        }
        Editing::Existing(user) => {
            let Some(op) = list.try_update(|l| l.apply_update(draft.apply_to(&user))).flatten() else {
                return;
            };
            reconcile(
                ctx,
                list,
                op,
                async move { api.update_user(&user.id, &draft).await.into_optional() },
                format!("User {} updated successfully", name),
                format!("Failed to update user {}", name),
            );
        }
    }
}

fn delete_user(ctx: AppContext, list: RwSignal<OptimisticList<User>>, user: User) {
    let Some(api) = ctx.api() else {
        return;
    };
    let Some(op) = list.try_update(|l| l.apply_delete(&user.id)).flatten() else {
        return;
    };
    reconcile(
        ctx,
        list,
        op,
        async move { api.delete_user(&user.id).await.into_optional().map(|_| None) },
        format!("User {} deleted successfully", user.name),
        format!("Failed to delete user {}", user.name),
    );
}

#[component]
fn UserFilters(filter: RwSignal<UserFilter>) -> impl IntoView {
    view! {
        <div class=css::toolbar>
            <input
                class=css::search
                type="search"
                placeholder="Search by name or email..."
                on:input=move |ev| filter.update(|f| f.query = event_target_value(&ev))
            />
            <select
                class=css::select
                on:change=move |ev| filter.update(|f| f.role = UserRole::parse(&event_target_value(&ev)))
            >
                <option value="">"All Roles"</option>
                {UserRole::ALL
                    .into_iter()
                    .map(|r| view! { <option value=r.as_str()>{r.as_str()}</option> })
                    .collect_view()}
            </select>
            <select
                class=css::select
                on:change=move |ev| filter.update(|f| f.status = UserStatus::parse(&event_target_value(&ev)))
            >
                <option value="">"All Statuses"</option>
                {UserStatus::ALL
                    .into_iter()
                    .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}

#[component]
fn UserCard(
    user: User,
    on_view: Callback<String>,
    on_edit: Callback<User>,
    on_delete: Callback<User>,
) -> impl IntoView {
    let id = user.id.clone();
    let for_edit = user.clone();
    let for_delete = user.clone();
    let avatar = if user.avatar.is_empty() {
        initials(&user.name)
    } else {
        user.avatar.clone()
    };
    let summary = match user.role {
        UserRole::Student => format!(
            "{} courses, GPA {}",
            user.courses.unwrap_or(0),
            user.gpa.map(|g| format!("{:.1}", g)).unwrap_or_else(|| "-".into())
        ),
        UserRole::Educator => format!(
            "{} courses, {} students",
            user.courses.unwrap_or(0),
            user.students.unwrap_or(0)
        ),
        UserRole::Administrator => "Full access".to_string(),
    };

    view! {
        <article class=css::card>
            <div class=css::cardHeader>
                <span class=css::avatar>{avatar}</span>
                <div class=css::listBody>
                    <h4 class=css::cardTitle>{user.name.clone()}</h4>
                    <span class=css::muted>{user.email.clone()}</span>
                </div>
            </div>
            <div class=css::tags>
                <Badge text=user.role.as_str() tone=role_tone(user.role) />
                <Badge text=user.status.as_str() tone=status_tone(user.status) />
            </div>
            <div class=css::cardMeta>
                <span>{user.location.clone()}</span>
                <span>{format!("Last login {}", format_date(&user.last_login, DateStyle::Short))}</span>
                <span>{summary}</span>
            </div>
            <div class=css::cardActions>
                <IconButton title="View" icon=ic::VIEW on_click=Callback::new(move |_: ()| on_view.run(id.clone())) />
                <IconButton title="Edit" icon=ic::EDIT on_click=Callback::new(move |_: ()| on_edit.run(for_edit.clone())) />
                <IconButton title="Delete" icon=ic::DELETE on_click=Callback::new(move |_: ()| on_delete.run(for_delete.clone())) />
            </div>
        </article>
    }
}

#[component]
fn UserTable(
    users: Vec<User>,
    on_view: Callback<String>,
    on_edit: Callback<User>,
    on_delete: Callback<User>,
) -> impl IntoView {
    let rows = users
        .into_iter()
        .map(|user| {
            let id = user.id.clone();
            let for_edit = user.clone();
            let for_delete = user.clone();
            view! {
                <tr>
                    <td>{user.name.clone()}</td>
                    <td>{user.email.clone()}</td>
                    <td><Badge text=user.role.as_str() tone=role_tone(user.role) /></td>
                    <td><Badge text=user.status.as_str() tone=status_tone(user.status) /></td>
                    <td>{format_date(&user.last_login, DateStyle::Short)}</td>
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
        <DataTable headers=vec!["Name", "Email", "Role", "Status", "Last Login", "Actions"]>
            {rows}
        </DataTable>
    }
}

#[component]
fn UserDetail(user: User, on_close: Callback<()>) -> impl IntoView {
    let row = |label: &'static str, value: String| {
        view! {
            <span class=css::detailLabel>{label}</span>
            <span>{value}</span>
        }
    };
    let optional = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

    view! {
        <Modal title=user.name.clone() on_close=on_close>
            <div class=css::detailGrid>
                {row("Email", user.email.clone())}
                {row("Role", user.role.as_str().to_string())}
                {row("Status", user.status.as_str().to_string())}
                {row("Location", user.location.clone())}
                {row("Joined", format_date(&user.join_date, DateStyle::Long))}
                {row("Last login", format_date(&user.last_login, DateStyle::Long))}
                {row("Courses", optional(user.courses.map(|c| c.to_string())))}
                {row("Assignments", optional(user.completed_assignments.map(|c| c.to_string())))}
                {row("GPA", optional(user.gpa.map(|g| format!("{:.1}", g))))}
                {row("Students", optional(user.students.map(|s| s.to_string())))}
                {row("Rating", optional(user.rating.map(|r| format!("{:.1}", r))))}
                {row("Permissions", if user.permissions.is_empty() {
                    "-".to_string()
                } else {
                    user.permissions.join(", ")
                })}
            </div>
        </Modal>
    }
}

#[component]
fn UserEditor(
    target: Editing,
    on_close: Callback<()>,
    on_save: Callback<(Editing, UserDraft)>,
) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let initial = match &target {
        Editing::Existing(user) => Some(UserDraft::from_user(user)),
        Editing::New => None,
    };
    let title = if initial.is_some() { "Edit User" } else { "Add User" };

    let name = RwSignal::new(initial.as_ref().map(|d| d.name.clone()).unwrap_or_default());
    let email = RwSignal::new(initial.as_ref().map(|d| d.email.clone()).unwrap_or_default());
    let role = RwSignal::new(
        initial
            .as_ref()
            .map(|d| d.role.as_str().to_string())
            .unwrap_or_default(),
    );
    let status = RwSignal::new(initial.as_ref().map(|d| d.status).unwrap_or(UserStatus::Active));
    let location = RwSignal::new(initial.map(|d| d.location).unwrap_or_default());
    let error = RwSignal::new(None::<String>);
    let target = StoredValue::new(target);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = validation::parse_role(&role.get_untracked()).and_then(|role| {
            let draft = UserDraft {
                name: name.get_untracked().trim().to_string(),
                email: email.get_untracked().trim().to_string(),
                role,
                status: status.get_untracked(),
                location: location.get_untracked().trim().to_string(),
            };
            validation::validate_user(&draft).map(|()| draft)
        });
        match draft {
            Ok(draft) => on_save.run((target.get_value(), draft)),
            Err(e) => {
                report_invalid(ctx, &e);
                error.set(Some(e.to_string()));
            }
        }
    };

    view! {
        <Modal title=title on_close=on_close>
            <form class=css::form on:submit=submit>
                {move || error.get().map(|e| view! { <p class=css::formError>{e}</p> })}
                <label class=css::field>
                    "Full name *"
                    <input class=css::input type="text" bind:value=name />
                </label>
                <label class=css::field>
                    "Email *"
                    <input class=css::input type="email" bind:value=email />
                </label>
                <div class=css::fieldRow>
                    <label class=css::field>
                        "Role *"
                        <select class=css::select on:change=move |ev| role.set(event_target_value(&ev))>
                            <option value="" selected=move || role.with(String::is_empty)>
                                "Select role"
                            </option>
                            {UserRole::ALL
                                .into_iter()
                                .map(|r| view! {
                                    <option value=r.as_str() selected=move || role.with(|v| v == r.as_str())>
                                        {r.as_str()}
                                    </option>
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <label class=css::field>
                        "Status"
                        <select
                            class=css::select
                            on:change=move |ev| {
                                if let Some(s) = UserStatus::parse(&event_target_value(&ev)) {
                                    status.set(s);
                                }
                            }
                        >
                            {UserStatus::ALL
                                .into_iter()
                                .map(|s| view! {
                                    <option value=s.as_str() selected=move || status.get() == s>
                                        {s.as_str()}
                                    </option>
                                })
                                .collect_view()}
                        </select>
                    </label>
                </div>
                <label class=css::field>
                    "Location"
                    <input class=css::input type="text" bind:value=location />
                </label>
                <div class=css::formActions>
                    <ActionButton label="Cancel" icon=ic::CLOSE on_click=on_close />
                    <button class=css::submit type="submit">"Save"</button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_tones_are_distinct() {
        let tones: Vec<Tone> = UserRole::ALL.into_iter().map(role_tone).collect();
        assert_eq!(tones, vec![Tone::Info, Tone::Success, Tone::Warning]);
        assert_eq!(status_tone(UserStatus::Inactive), Tone::Neutral);
    }
}

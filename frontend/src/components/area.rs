//! 角色子树的外壳：导航栏 + 当前页面

use crate::auth::use_auth;
use crate::web::router::use_router;
use circuitai::{AppRoute, Subtree};
use leptos::prelude::*;

fn nav_links(subtree: Subtree) -> Vec<(&'static str, AppRoute)> {
    match subtree {
        Subtree::Student => vec![
            ("Home", AppRoute::StudentHome),
            ("Courses", AppRoute::StudentCourses),
            ("Assignments", AppRoute::StudentAssignments),
            ("Profile", AppRoute::StudentProfile),
        ],
        Subtree::Instructor => vec![
            ("Home", AppRoute::InstructorHome),
            ("Courses", AppRoute::InstructorCourses),
            ("Submissions", AppRoute::InstructorSubmissions),
        ],
        Subtree::Admin => vec![
            ("Home", AppRoute::AdminHome),
            ("Users", AppRoute::AdminUsers),
            ("Settings", AppRoute::AdminSettings),
        ],
        Subtree::Loading | Subtree::Public => Vec::new(),
    }
}

fn page_title(route: &AppRoute) -> String {
    match route {
        AppRoute::StudentHome | AppRoute::InstructorHome | AppRoute::AdminHome => {
            "Dashboard".to_string()
        }
        AppRoute::StudentCourses | AppRoute::InstructorCourses => "Courses".to_string(),
        AppRoute::StudentAssignments => "Assignments".to_string(),
        AppRoute::StudentProfile => "Profile".to_string(),
        AppRoute::InstructorCourse { course_id } => format!("Course {course_id}"),
        AppRoute::InstructorCourseAssignments { course_id } => {
            format!("Course {course_id} · Assignments")
        }
        AppRoute::InstructorAssignment { assignment_id, .. } => {
            format!("Assignment {assignment_id}")
        }
        AppRoute::InstructorSubmission { submission_id, .. } => {
            format!("Submission {submission_id}")
        }
        AppRoute::InstructorSubmissions => "Submissions".to_string(),
        AppRoute::AdminUsers => "Users".to_string(),
        AppRoute::AdminSettings => "Settings".to_string(),
        AppRoute::Modal => "Details".to_string(),
        AppRoute::NotFound => "404".to_string(),
        AppRoute::Login => String::new(),
    }
}

#[component]
pub fn AreaShell(subtree: Subtree) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let user_name = move || {
        auth.session
            .get()
            .profile()
            .map(|p| p.full_name.clone())
            .unwrap_or_default()
    };

    let links = nav_links(subtree)
        .into_iter()
        .map(|(label, route)| {
            let href = route.to_path();
            let target = route.clone();
            let is_active = move || router.current_route().get().as_ref() == Some(&route);
            view! {
                <li>
                    <a
                        href=href
                        class:active=is_active
                        on:click=move |ev: leptos::web_sys::MouseEvent| {
                            ev.prevent_default();
                            router.navigate_to(target.clone());
                        }
                    >
                        {label}
                    </a>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow">
                <div class="flex-1 gap-2">
                    <span class="text-xl font-bold">"CircuitAI"</span>
                    <span class="badge badge-outline">{subtree.name()}</span>
                </div>
                <ul class="menu menu-horizontal">{links}</ul>
                <div class="flex-none gap-2">
                    <span class="text-sm">{user_name}</span>
                    <button class="btn btn-ghost btn-sm" on:click=move |_| router.back()>
                        "Back"
                    </button>
                    <button class="btn btn-ghost btn-sm" on:click=move |_| auth.refresh_user()>
                        "Refresh"
                    </button>
                    <button class="btn btn-outline btn-sm" on:click=move |_| auth.logout()>
                        "Logout"
                    </button>
                </div>
            </div>
            <main class="p-6">
                <h1 class="text-2xl font-bold">
                    {move || router.current_route().get().as_ref().map(page_title).unwrap_or_default()}
                </h1>
            </main>
        </div>
    }
}

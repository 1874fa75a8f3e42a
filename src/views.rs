//! Server-rendered HTML pages.

use std::fmt::Write;

use axum::response::Html;

use crate::models::page::PageContext;

/// The pages rendered from a `PageContext`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    Notes,
    Login,
    Signup,
}

impl Page {
    fn title(self) -> &'static str {
        match self {
            Page::Home => "Food Tracker",
            Page::About => "About",
            Page::Notes => "My Notes",
            Page::Login => "Log in",
            Page::Signup => "Sign up",
        }
    }
}

/// Escapes text for use in HTML bodies and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders `page` inside the shared layout.
pub fn render(page: Page, ctx: &PageContext) -> Html<String> {
    let body = match page {
        Page::Home => home(ctx),
        Page::About => about(),
        Page::Notes => notes(ctx),
        Page::Login => login_form(),
        Page::Signup => signup_form(),
    };
    Html(layout(page.title(), ctx, &body))
}

fn layout(title: &str, ctx: &PageContext, body: &str) -> String {
    let account_links = match &ctx.user {
        Some(user) => format!(
            r#"<span class="who">{}</span> <a href="/logout">Log out</a>"#,
            escape(&user.username)
        ),
        None => r#"<a href="/login">Log in</a> <a href="/signup">Sign up</a>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/styles.css">
</head>
<body>
<nav><a href="/">Home</a> <a href="/notes">Notes</a> <a href="/about">About</a> {account_links}</nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

fn home(ctx: &PageContext) -> String {
    let Some(user) = &ctx.user else {
        return r#"<h1>Food Tracker</h1>
<p>Write down what you eat every day and keep your streak going.</p>
<p><a href="/login">Log in</a> or <a href="/signup">create an account</a> to start.</p>"#
            .to_string();
    };

    let mut html = format!("<h1>Hello, {}!</h1>\n", escape(user.display_name()));
    html.push_str(&streak_section(ctx));
    html.push_str(
        r#"<section class="note-form">
<h2>What did you eat today?</h2>
<form method="post" action="/foodNoteForm">
<label>Title <input type="text" name="FoodTitle" required></label>
<label>Note <textarea name="FoodNote" rows="4" required></textarea></label>
<button type="submit">Save note</button>
</form>
</section>
"#,
    );
    if !ctx.notes.is_empty() {
        html.push_str("<section class=\"recent\">\n<h2>Your notes</h2>\n");
        html.push_str(&note_list(ctx));
        html.push_str("\n</section>");
    }
    html
}

fn streak_section(ctx: &PageContext) -> String {
    let streak = &ctx.streak;
    let mut html = String::from("<section class=\"streak\">\n");

    if streak.is_empty() {
        if streak.has_gap {
            html.push_str("<p>Your streak is broken. Log a meal today to start a new one.</p>\n");
        } else {
            html.push_str("<p>No notes yet. Log a meal to start your streak.</p>\n");
        }
    } else {
        let days = streak.len();
        let unit = if days == 1 { "day" } else { "days" };
        let _ = writeln!(html, "<p class=\"count\">🔥 {days} {unit} in a row</p>");
        if streak.has_gap {
            html.push_str("<p>Before that you missed a day.</p>\n");
        }
        html.push_str("<ul class=\"days\">\n");
        for day in &streak.gaps {
            let _ = writeln!(html, "<li>{}</li>", escape(day));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</section>\n");
    html
}

fn notes(ctx: &PageContext) -> String {
    if ctx.user.is_none() {
        return r#"<h1>My Notes</h1>
<p><a href="/login">Log in</a> to see your notes.</p>"#
            .to_string();
    }

    if ctx.notes.is_empty() {
        return "<h1>My Notes</h1>\n<p>You have not written any notes yet.</p>".to_string();
    }

    format!("<h1>My Notes</h1>\n{}", note_list(ctx))
}

fn note_list(ctx: &PageContext) -> String {
    let mut html = String::from("<ul class=\"notes\">\n");
    for note in &ctx.notes {
        let _ = writeln!(
            html,
            "<li><h3>{}</h3><time>{}</time><p>{}</p></li>",
            escape(&note.title),
            escape(&note.calendar_day()),
            escape(&note.body)
        );
    }
    html.push_str("</ul>");
    html
}

fn about() -> String {
    r#"<h1>About</h1>
<p>Food Tracker is a small journal for your meals. Write at least one note a day
and watch your streak grow; skip a day and it starts over.</p>"#
        .to_string()
}

fn login_form() -> String {
    r#"<h1>Log in</h1>
<form method="post" action="/login">
<label>Username <input type="text" name="username" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Log in</button>
</form>
<p><a href="/forgot-password">Forgot password?</a></p>
<p>No account yet? <a href="/signup">Sign up</a>.</p>"#
        .to_string()
}

fn signup_form() -> String {
    r#"<h1>Sign up</h1>
<form method="post" action="/signup">
<label>Username <input type="text" name="username" maxlength="50" required></label>
<label>Password <input type="password" name="password" required></label>
<label>First name <input type="text" name="firstName" maxlength="50"></label>
<label>Last name <input type="text" name="lastName" maxlength="50"></label>
<button type="submit">Sign up</button>
</form>
<p>Already registered? <a href="/login">Log in</a>.</p>"#
        .to_string()
}

/// The page answered for `/forgot-password`.
pub fn forgot_password() -> Html<&'static str> {
    Html(
        r#"<html>
<head><title>Feature Not Implemented</title></head>
<body style="font-family: Arial, sans-serif; text-align: center; margin-top: 50px;">
<h1>Forgot Password</h1>
<p>This feature is not yet implemented.</p>
<p>Please contact the admin or software engineer for assistance.</p>
<a href="/">Back to homepage</a>.
</body>
</html>
"#,
    )
}

/// Confirmation shown after signing up.
pub fn registration_complete() -> Html<&'static str> {
    Html(r#"Registration successful! You can now <a href="/login">log in</a>."#)
}

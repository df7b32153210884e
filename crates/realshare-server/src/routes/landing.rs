//! Landing page routes.
//!
//! `GET /` renders the page with an empty early-access form. `POST /` runs
//! the submission handler on the posted `email` and renders the page again
//! with the acknowledgment and whatever value the field keeps afterwards.
//! A body that is not a urlencoded form gets the plain page back.
//!
//! The static page lives in `const` templates. The two fragments that carry
//! user-visible dynamic text, the email input and the notice, are built with
//! `maud` so their contents are escaped.

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use chrono::Datelike;
use maud::{Markup, html};
use serde::Deserialize;
use tracing::debug;

use realshare_core::capture::EmailCapture;
use realshare_core::submission::Acknowledgment;

use crate::state::AppState;

/// Build the landing page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(landing_page).post(submit_signup))
}

/// Form body of the early-access form.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    /// Raw value of the email input. Missing is treated as empty.
    #[serde(default)]
    pub email: String,
}

async fn landing_page(State(state): State<Arc<AppState>>) -> Html<String> {
    render(&state, &EmailCapture::default(), None)
}

async fn submit_signup(
    State(state): State<Arc<AppState>>,
    form: Result<Form<SignupForm>, FormRejection>,
) -> Html<String> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(error = %rejection, "ignoring unreadable signup form");
            return render(&state, &EmailCapture::default(), None);
        }
    };
    let mut capture = EmailCapture::from_input(&form.email);
    let ack = state.submissions.submit(&mut capture).await;
    render(&state, &capture, ack)
}

/// Render the full page for the current form state.
fn render(state: &AppState, capture: &EmailCapture, ack: Option<Acknowledgment>) -> Html<String> {
    let analytics = state
        .analytics
        .as_ref()
        .map(realshare_core::analytics::Analytics::head_snippet)
        .unwrap_or_default();

    let mut html = String::with_capacity(LANDING_HEAD.len() + LANDING_BODY.len() + 512);
    html.push_str(&LANDING_HEAD.replace("{{ANALYTICS}}", &analytics));

    // User input goes in last so it is never scanned for placeholders.
    let body = LANDING_BODY
        .replace("{{YEAR}}", &chrono::Utc::now().year().to_string())
        .replace("{{NOTICE}}", &notice(ack).into_string())
        .replace("{{EMAIL_INPUT}}", &email_input(capture.email()).into_string());
    html.push_str(&body);
    Html(html)
}

fn notice(ack: Option<Acknowledgment>) -> Markup {
    let Some(ack) = ack else {
        return html! {};
    };
    let kind = match ack {
        Acknowledgment::Saved => "saved",
        Acknowledgment::LocalOnly => "local",
        Acknowledgment::Failed => "failed",
    };
    html! {
        p class=(format!("notice notice-{kind}")) role="status" { (ack.message()) }
    }
}

fn email_input(value: &str) -> Markup {
    html! {
        input id="email" name="email" type="email" required value=(value)
            placeholder="you@investor.com";
    }
}

/// HTML head and styles for the landing page.
const LANDING_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"/><meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>RealShare &mdash; Fractional real estate, simplified.</title>
<meta name="description" content="Invest in premium properties with as little as one share."/>
{{ANALYTICS}}<style>
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
:root{--text:#111827;--muted:#4b5563;--faint:#6b7280;--line:#f3f4f6;--primary:#2563eb;--primary-hover:#1d4ed8;--font:-apple-system,BlinkMacSystemFont,'Segoe UI',Inter,sans-serif}
html{scroll-behavior:smooth}
body{font-family:var(--font);background:#fff;color:var(--text);line-height:1.6;-webkit-font-smoothing:antialiased;min-height:100vh}
a{color:inherit;text-decoration:none}
.header{position:fixed;inset:0 0 auto 0;z-index:30;background:rgba(255,255,255,.6);backdrop-filter:blur(4px);border-bottom:1px solid var(--line)}
.header-inner{max-width:64rem;margin:0 auto;padding:16px 24px;display:flex;align-items:center;justify-content:space-between}
.brand{font-size:18px;font-weight:600;letter-spacing:-.01em}
.nav{display:flex;gap:24px;font-size:14px}
.nav a{color:#374151}.nav a:hover{color:var(--text)}
main{padding-top:112px}
.fade-up{animation:fade-up .45s ease-out both}
@keyframes fade-up{from{opacity:0;transform:translateY(8px)}to{opacity:1;transform:none}}
.hero{max-width:64rem;margin:0 auto;padding:0 24px;text-align:center}
.hero h1{font-size:60px;font-weight:800;line-height:1.1;letter-spacing:-.025em}
.hero p{margin:24px auto 0;max-width:42rem;font-size:18px;color:var(--muted)}
.hero-actions{margin-top:32px;display:flex;gap:16px;justify-content:center}
.btn{display:inline-flex;align-items:center;justify-content:center;border-radius:8px;font-size:14px;font-weight:500;padding:12px 24px;border:1px solid transparent;cursor:pointer;font-family:var(--font)}
.btn-primary{background:var(--primary);color:#fff}.btn-primary:hover{background:var(--primary-hover)}
.btn-outline{border-color:#e5e7eb;color:#374151;padding:12px 20px}.btn-outline:hover{background:#f9fafb}
.btn:focus-visible,input:focus{outline:none;box-shadow:0 0 0 2px #bfdbfe}
.features{max-width:64rem;margin:80px auto 0;padding:0 24px;display:grid;grid-template-columns:repeat(3,1fr);gap:32px}
.feature{padding:16px}
.feature h3{font-size:18px;font-weight:600}
.feature p{margin-top:8px;font-size:14px;color:var(--muted)}
.signup{max-width:48rem;margin:80px auto 0;padding:0 24px}
.signup-card{border:1px solid var(--line);border-radius:12px;padding:24px;display:flex;align-items:center;justify-content:space-between;gap:16px}
.signup-card h4{font-size:18px;font-weight:600}
.signup-card p{margin-top:4px;font-size:14px;color:var(--muted)}
.signup form{display:flex;align-items:center;gap:12px}
.signup input{min-width:0;flex:1;border:1px solid #e5e7eb;border-radius:6px;padding:8px 16px;font-size:14px;color:#1f2937}
.signup .btn{padding:8px 16px;border-radius:6px;white-space:nowrap}
.notice{margin-top:12px;font-size:14px;border-radius:6px;padding:8px 12px}
.notice-saved,.notice-local{background:#eff6ff;color:#1e40af}
.notice-failed{background:#fef2f2;color:#991b1b}
.sr-only{position:absolute;width:1px;height:1px;overflow:hidden;clip:rect(0,0,0,0);white-space:nowrap}
.footer{margin-top:80px;padding-bottom:48px;text-align:center;font-size:14px;color:var(--faint)}
@media(max-width:768px){.hero h1{font-size:36px}.features{grid-template-columns:1fr}.nav{display:none}.signup-card{flex-direction:column;align-items:flex-start}.signup form{width:100%}}
</style></head>
"##;

/// HTML body for the landing page.
const LANDING_BODY: &str = r##"<body>
<header class="header">
  <div class="header-inner">
    <div class="brand">RealShare</div>
    <nav class="nav">
      <a href="#why">Why RealShare</a>
      <a href="#learn">How it works</a>
      <a href="#invest">Invest</a>
    </nav>
  </div>
</header>
<main>
<section class="hero fade-up" id="why">
  <h1>Fractional real estate, simplified.</h1>
  <p>Invest in premium properties with as little as one share. Diversify your portfolio, earn passive income, and own a piece of institutional-grade real estate.</p>
  <div class="hero-actions">
    <a href="#invest" class="btn btn-primary">Start investing</a>
    <a href="#learn" class="btn btn-outline">Learn how it works</a>
  </div>
</section>
<section class="features fade-up" id="learn">
  <div class="feature"><h3>Institutional Properties</h3><p>Hand-picked, professionally managed assets in stable markets.</p></div>
  <div class="feature"><h3>Low Minimums</h3><p>Start with a modest investment to access diversified real estate exposure.</p></div>
  <div class="feature"><h3>Transparent Reporting</h3><p>Regular performance updates, clear fee structures, and detailed reports.</p></div>
</section>
<section class="signup fade-up" id="invest">
  <div class="signup-card" id="early-access">
    <div>
      <h4>Get early access</h4>
      <p>Join our investor list for priority deals and updates.</p>
    </div>
    <form method="post" action="/#early-access">
      <label for="email" class="sr-only">Email address</label>
      {{EMAIL_INPUT}}
      <button type="submit" class="btn btn-primary">Join the list</button>
    </form>
  </div>
  {{NOTICE}}
</section>
<footer class="footer">
  <p>&copy; {{YEAR}} RealShare &mdash; All rights reserved.</p>
</footer>
</main>
</body></html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_notice_without_acknowledgment() {
        assert_eq!(notice(None).into_string(), "");
    }

    #[test]
    fn notice_is_a_status_region() {
        let html = notice(Some(Acknowledgment::Failed)).into_string();
        assert!(html.contains("role=\"status\""));
        assert!(html.contains("notice-failed"));
        assert!(html.contains("Something went wrong. Please try again later."));
    }

    #[test]
    fn rendered_email_cannot_break_out_of_attribute() {
        let state = AppState::new(None, None);
        let capture = EmailCapture::from_input("\"><script>alert(1)</script>");
        let Html(page) = render(&state, &capture, Some(Acknowledgment::Failed));
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("value=\"&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn email_input_keeps_form_attributes() {
        let input = email_input("a@b.com").into_string();
        assert!(input.starts_with(r#"<input id="email" name="email" type="email" required"#));
        assert!(input.contains("value=\"a@b.com\""));
    }
}

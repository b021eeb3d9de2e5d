mod support;

use axum::http::{Method, StatusCode};
use serde_json::json;

use complaint_client::forms::Navigation;
use complaint_client::views::{ComplaintDetailView, ComplaintListView, DetailState, ListSource};

use support::{complaint_json, MockBackend, Reply};

fn highlighted(view: &ComplaintListView) -> Vec<u64> {
    view.visible()
        .iter()
        .filter(|row| row.highlighted)
        .map(|row| row.complaint.id)
        .collect()
}

#[tokio::test]
async fn paginated_body_offers_load_more() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::GET,
        "complaints/?page=1",
        Reply::ok(json!({
            "results": [complaint_json(1, "Broken chair in 204", 1)],
            "next": "page2",
            "count": 2,
        })),
    );
    backend.on(
        Method::GET,
        "complaints/?page=2",
        Reply::ok(json!({
            "results": [complaint_json(2, "Leaking tap in lab", 2)],
            "next": null,
            "count": 2,
        })),
    );
    let api = backend.client();
    let session = backend.session(&api, "abc", false).await;

    let mut view = ComplaintListView::new(ListSource::Mine);
    assert!(view.refresh(&api, &session).await);
    assert!(view.has_more());
    assert_eq!(view.items().len(), 1);

    assert!(view.load_more(&api, &session).await);
    assert!(!view.has_more());
    let ids: Vec<u64> = view.visible().iter().map(|r| r.complaint.id).collect();
    assert_eq!(ids, vec![2, 1]);

    assert!(!view.load_more(&api, &session).await, "nothing left to load");

    let queries: Vec<Option<String>> = backend.calls().into_iter().map(|r| r.query).collect();
    assert_eq!(queries, vec![Some("page=1".into()), Some("page=2".into())]);
}

#[tokio::test]
async fn bare_array_has_no_more() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::GET,
        "complaints/",
        Reply::ok(json!([complaint_json(1, "Broken chair in 204", 1)])),
    );
    let api = backend.client();
    let session = backend.session(&api, "abc", false).await;

    let mut view = ComplaintListView::new(ListSource::Mine);
    assert!(view.refresh(&api, &session).await);
    assert!(!view.has_more());
    assert_eq!(view.items().len(), 1);
}

#[tokio::test]
async fn highlight_is_dropped_after_the_next_fetch() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::GET,
        "complaints/",
        Reply::ok(json!([
            complaint_json(41, "Older complaint text", 1),
            complaint_json(42, "Newly created one", 2),
        ])),
    );
    let api = backend.client();
    let session = backend.session(&api, "abc", false).await;

    let nav = Navigation::to("/complaints")
        .with_highlight(42)
        .with_flash("Complaint created.");
    let mut view = ComplaintListView::new(ListSource::Mine).with_navigation(&nav);

    view.refresh(&api, &session).await;
    assert_eq!(highlighted(&view), vec![42]);

    view.refresh(&api, &session).await;
    assert!(highlighted(&view).is_empty());
}

#[tokio::test]
async fn expired_session_gets_sign_in_copy() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::GET,
        "complaints/",
        Reply::Json(StatusCode::UNAUTHORIZED, json!({ "detail": "Invalid token." })),
    );
    let api = backend.client();
    let session = backend.session(&api, "stale", false).await;

    let mut view = ComplaintListView::new(ListSource::Mine);
    assert!(!view.refresh(&api, &session).await);
    assert_eq!(view.error(), "You need to sign in again.");
    assert!(session.is_signed_in(), "session is not cleared automatically");
}

#[tokio::test]
async fn queue_reads_the_staff_endpoint() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::GET,
        "admin/complaints/",
        Reply::ok(json!([
            complaint_json(1, "Broken chair in 204", 1),
            complaint_json(2, "Leaking tap in lab", 2),
        ])),
    );
    let api = backend.client();
    let staff = backend.session(&api, "staff-token", true).await;

    let mut view = ComplaintListView::new(ListSource::Queue);
    assert!(view.refresh(&api, &staff).await);
    assert_eq!(view.items().len(), 2);
    assert!(!view.has_more());
    assert_eq!(backend.calls()[0].path, "/api/admin/complaints/");
}

#[tokio::test]
async fn detail_view_states() {
    let backend = MockBackend::start().await;
    backend.on(Method::GET, "complaints/3/", Reply::ok(complaint_json(3, "Cold classroom", 3)));
    let api = backend.client();
    let session = backend.session(&api, "abc", false).await;

    let mut view = ComplaintDetailView::new();
    assert_eq!(view.state(), &DetailState::Idle);

    view.load(3, &api, &session).await;
    assert_eq!(view.complaint().map(|c| c.id), Some(3));

    view.load(4, &api, &session).await;
    assert_eq!(view.state(), &DetailState::NotFound);
}

use crate::content::{self, TIPS};
use crate::intent::{self, Context};
use crate::models::{
    AssistantReply, AssistantRequest, ContactRequest, ContactResponse, FaqQuery, FaqResponse,
    TipsResponse, TrackRequest, TrackResponse, TrackingQuery, TrackingResponse,
};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use tracing::{debug, info};

pub async fn index() -> &'static str {
    "Reva backend is running 💜"
}

pub async fn assistant(payload: Option<Json<AssistantRequest>>) -> Json<AssistantReply> {
    let request = payload.map(|Json(request)| request).unwrap_or_default();
    let context = Context {
        name: request.name.as_deref(),
        mood: request.mood.as_deref(),
    };

    let reply = intent::respond(&request.message, &context, &mut rand::thread_rng());
    debug!(suggestions = ?reply.suggestions, "assistant replied");
    Json(reply)
}

pub async fn tips() -> Json<TipsResponse> {
    Json(TipsResponse {
        tip: content::random_tip(&mut rand::thread_rng()).to_string(),
        tips: TIPS.iter().map(|tip| tip.to_string()).collect(),
    })
}

pub async fn faq(Query(query): Query<FaqQuery>) -> Json<FaqResponse> {
    let (topic, answer) = content::faq(query.topic.as_deref());
    Json(FaqResponse {
        topic: topic.to_string(),
        answer: answer.to_string(),
    })
}

pub async fn track(
    State(state): State<AppState>,
    payload: Option<Json<TrackRequest>>,
) -> Json<TrackResponse> {
    let request = payload.map(|Json(request)| request).unwrap_or_default();
    let mut data = state.data.lock().await;
    let entry = data.record_tracking(request, Utc::now());
    info!(id = %entry.id, name = %entry.name, "tracking entry recorded");

    Json(TrackResponse {
        status: "ok".to_string(),
        entry,
    })
}

pub async fn tracking(
    State(state): State<AppState>,
    Query(query): Query<TrackingQuery>,
) -> Json<TrackingResponse> {
    let data = state.data.lock().await;
    Json(TrackingResponse {
        entries: data.list_tracking(query.name.as_deref()),
    })
}

pub async fn contact(
    State(state): State<AppState>,
    payload: Option<Json<ContactRequest>>,
) -> Json<ContactResponse> {
    let request = payload.map(|Json(request)| request).unwrap_or_default();
    let mut data = state.data.lock().await;
    let message = data.receive_contact(request, Utc::now());
    info!(name = %message.name, email = %message.email, "contact form received");

    Json(ContactResponse {
        status: "ok".to_string(),
        message: "Thanks — we received your message.".to_string(),
    })
}

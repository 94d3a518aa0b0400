use crate::infra::{
    InMemoryApplicantRepository, InMemoryEventRepository, InMemoryMessageRepository,
    InMemorySectionRepository, InMemoryVideoRepository,
};
use chrono::{Duration, Utc};
use clap::Args;
use marquee::applications::{ApplicationService, ApplicationSubmission};
use marquee::catalog::{
    youtube_embed_url, CatalogService, EventDraft, EventScope, MessageDraft, VideoDraft,
};
use marquee::error::AppError;
use marquee::forms::{lint_schema, AnswerSheet, AnswerValue, FormQuestion, QuestionKind};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Days until the demo event takes place
    #[arg(long, default_value_t = 14)]
    pub(crate) days_until_event: i64,
    /// Skip the admin review portion of the demo
    #[arg(long)]
    pub(crate) skip_review: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        days_until_event,
        skip_review,
    } = args;

    let events = Arc::new(InMemoryEventRepository::default());
    let videos = Arc::new(InMemoryVideoRepository::default());
    let sections = Arc::new(InMemorySectionRepository::default());
    let messages = Arc::new(InMemoryMessageRepository::default());
    let applicants = Arc::new(InMemoryApplicantRepository::default());

    let catalog = Arc::new(CatalogService::new(
        events.clone(),
        videos,
        sections,
        messages,
    ));
    let applications = ApplicationService::new(events, applicants);

    println!("Marquee demo: event intake and review");

    let schema = demo_schema();
    for defect in lint_schema(&schema) {
        println!("  Schema warning: {defect}");
    }

    let event = match catalog.create_event(EventDraft {
        title: "Warehouse Night".to_string(),
        description: Some("An all-night showcase".to_string()),
        poster_url: None,
        is_active: true,
        event_date: Utc::now() + Duration::days(days_until_event),
        form_questions: schema,
    }) {
        Ok(event) => event,
        Err(err) => {
            println!("  Event creation failed: {err}");
            return Ok(());
        }
    };
    println!(
        "- Created event {} ({}) with {} form questions",
        event.id.0,
        event.event_date.format("%Y-%m-%d"),
        event.form_questions.len()
    );

    match catalog.events(EventScope::Upcoming, Utc::now()) {
        Ok(upcoming) => println!("- Upcoming events visible to the public: {}", upcoming.len()),
        Err(err) => println!("  Listing failed: {err}"),
    }

    if let Ok(video) = catalog.add_video(VideoDraft {
        title: "Last year's aftermovie".to_string(),
        video_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
        is_active: true,
    }) {
        match youtube_embed_url(&video.video_url) {
            Some(embed) => println!("- Video {} embeds at {embed}", video.id.0),
            None => println!("- Video {} has no recognizable embed id", video.id.0),
        }
    }

    let mut incomplete = AnswerSheet::new();
    incomplete.set("q-slot", AnswerValue::Text("Opening".to_string()));
    let rejected = applications.submit(ApplicationSubmission {
        event_id: event.id.clone(),
        full_name: "Nova".to_string(),
        email: None,
        phone: "5550001122".to_string(),
        answers: incomplete,
    });
    if let Err(err) = rejected {
        println!("- Incomplete submission rejected: {err}");
    }

    let mut answers = AnswerSheet::new();
    answers.set("q-name", AnswerValue::Text("Nova".to_string()));
    answers.set("q-slot", AnswerValue::Text("Closing".to_string()));
    answers.set("q-own-gear", AnswerValue::Flag(true));
    let applicant = match applications.submit(ApplicationSubmission {
        event_id: event.id.clone(),
        full_name: "Deniz Kaya".to_string(),
        email: Some("deniz@example.com".to_string()),
        phone: "5550001122".to_string(),
        answers,
    }) {
        Ok(applicant) => applicant,
        Err(err) => {
            println!("  Submission failed: {err}");
            return Ok(());
        }
    };
    println!(
        "- Accepted applicant {} with status {}",
        applicant.id.0,
        applicant.status.label()
    );

    if skip_review {
        return Ok(());
    }

    println!("\nAdmin review");
    use marquee::applications::ApplicantStatus;
    for status in [ApplicantStatus::Approved, ApplicantStatus::TicketIssued] {
        match applications.set_status(&applicant.id, status) {
            Ok(updated) => println!("- {} -> {}", updated.id.0, updated.status.label()),
            Err(err) => println!("  Status update failed: {err}"),
        }
    }

    if let Ok(message) = catalog.submit_message(MessageDraft {
        full_name: "Booking agent".to_string(),
        phone: "5550003344".to_string(),
        message: "Do you take international acts?".to_string(),
    }) {
        println!("- Contact message {} stored for the console", message.id.0);
    }

    match applications.for_event(&event.id) {
        Ok(listed) => println!("- Applicants on file for {}: {}", event.title, listed.len()),
        Err(err) => println!("  Applicant listing failed: {err}"),
    }

    Ok(())
}

fn demo_schema() -> Vec<FormQuestion> {
    vec![
        FormQuestion {
            id: "q-name".to_string(),
            label: "Stage name".to_string(),
            kind: QuestionKind::Text,
            required: true,
            options: Vec::new(),
        },
        FormQuestion {
            id: "q-slot".to_string(),
            label: "Preferred slot".to_string(),
            kind: QuestionKind::Select,
            required: false,
            options: vec![
                "Opening".to_string(),
                "Peak".to_string(),
                "Closing".to_string(),
            ],
        },
        FormQuestion {
            id: "q-own-gear".to_string(),
            label: "Bringing your own gear?".to_string(),
            kind: QuestionKind::Checkbox,
            required: false,
            options: Vec::new(),
        },
    ]
}

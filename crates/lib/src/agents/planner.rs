//! # Revision Planner Agent
//!
//! Builds a day-by-day revision schedule for a document. Schedule dates are
//! always assigned locally from the generation date; the model's dates are
//! discarded. When the model cannot produce a usable plan, a deterministic
//! local plan is built instead so the student still gets something to follow.

use super::{require_document, AgentError};
use crate::{
    constants::{MAX_PLAN_TOPICS, PLANNER_CONTEXT_CHARS},
    memory,
    prompts::{
        excerpt,
        planner::{PLANNER_SYSTEM_PROMPT, PLANNER_USER_PROMPT},
    },
    providers::ai::{AiProvider, GenerationOptions},
    structured::generate_structured,
};
use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use turso::Database;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RevisionPlan {
    #[serde(default)]
    pub plan_name: String,
    #[serde(default)]
    pub total_days: u32,
    #[serde(default)]
    pub hours_per_day: f64,
    #[serde(default)]
    pub schedule: Vec<PlanDay>,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlanDay {
    #[serde(default)]
    pub day: u32,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub activities: Vec<PlanActivity>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlanActivity {
    #[serde(rename = "type", default)]
    pub activity_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration_minutes: i64,
}

/// A generated plan together with its storage id.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlanResult {
    pub plan_id: i64,
    pub document_id: i64,
    pub plan: RevisionPlan,
    pub degraded: bool,
}

/// Generates and stores a revision plan.
///
/// Topics come from the first source that yields any: the caller's
/// `focus_topics`, the `topics` list in the document's metadata, the distinct
/// topics of the document's flashcards, and finally a generic placeholder.
pub async fn generate_revision_plan(
    db: &Database,
    ai_provider: &dyn AiProvider,
    document_id: i64,
    days_until_exam: u32,
    hours_per_day: f64,
    focus_topics: Option<Vec<String>>,
) -> Result<PlanResult, AgentError> {
    let document = require_document(db, document_id).await?;
    let days = days_until_exam.clamp(1, 365);
    info!(document_id, days, hours_per_day, "Generating revision plan");

    let topics = resolve_topics(db, document_id, document.metadata.as_ref(), focus_topics).await?;
    // Quiz accuracy goes into the prompt so the model can weight weak areas.
    let stats = memory::get_performance_stats(db, Some(document_id)).await?;

    let user_prompt = PLANNER_USER_PROMPT
        .replace("{days}", &days.to_string())
        .replace("{hours}", &hours_per_day.to_string())
        .replace("{topics}", &topics.join(", "))
        .replace("{accuracy}", &stats.accuracy.to_string())
        .replace(
            "{excerpt}",
            excerpt(&document.content, PLANNER_CONTEXT_CHARS),
        );

    let options = GenerationOptions {
        temperature: 0.6,
        max_tokens: 4096,
    };
    let generated = generate_structured::<RevisionPlan>(
        ai_provider,
        PLANNER_SYSTEM_PROMPT,
        &user_prompt,
        &options,
    )
    .await?;

    let start_date = Utc::now().date_naive();
    let degraded = generated.degraded;
    let mut plan = match generated.value {
        Some(plan) => plan,
        None => {
            warn!(document_id, "Planner produced no usable JSON, building a local plan");
            build_fallback_plan(&topics, days, hours_per_day)
        }
    };

    if plan.total_days == 0 {
        plan.total_days = days;
    }
    if plan.hours_per_day == 0.0 {
        plan.hours_per_day = hours_per_day;
    }
    assign_dates(&mut plan.schedule, start_date);

    let plan_value = serde_json::to_value(&plan)?;
    let plan_id = memory::insert_revision_plan(db, document_id, &plan_value).await?;

    info!(document_id, plan_id, days = plan.schedule.len(), "Revision plan stored");
    Ok(PlanResult {
        plan_id,
        document_id,
        plan,
        degraded,
    })
}

async fn resolve_topics(
    db: &Database,
    document_id: i64,
    metadata: Option<&serde_json::Value>,
    focus_topics: Option<Vec<String>>,
) -> Result<Vec<String>, AgentError> {
    if let Some(topics) = focus_topics {
        let topics: Vec<String> = topics
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .collect();
        if !topics.is_empty() {
            return Ok(topics);
        }
    }

    if let Some(topics) = metadata
        .and_then(|m| m.get("topics"))
        .and_then(|t| t.as_array())
    {
        let topics: Vec<String> = topics
            .iter()
            .filter_map(|t| t.as_str())
            .map(String::from)
            .collect();
        if !topics.is_empty() {
            return Ok(topics);
        }
    }

    let mut topics = memory::distinct_flashcard_topics(db, document_id).await?;
    topics.truncate(MAX_PLAN_TOPICS);
    if !topics.is_empty() {
        return Ok(topics);
    }

    Ok(vec!["General Content".to_string()])
}

/// Rewrites every schedule entry's date as `start + position`, so dates
/// strictly increase by one day from the generation date.
fn assign_dates(schedule: &mut [PlanDay], start_date: NaiveDate) {
    for (offset, day) in schedule.iter_mut().enumerate() {
        let date = start_date + Days::new(offset as u64);
        day.date = date.format("%Y-%m-%d").to_string();
    }
}

/// The deterministic plan used when the model's reply is unusable: topics are
/// dealt round the available days, each day getting a reading and a practice
/// block sized to half the daily hours.
fn build_fallback_plan(topics: &[String], days: u32, hours_per_day: f64) -> RevisionPlan {
    let topics_per_day = (topics.len() / days as usize).max(1);
    let block_minutes = (hours_per_day * 30.0) as i64;

    let schedule = (1..=days)
        .map(|day| {
            let start = (day as usize - 1) * topics_per_day;
            let mut day_topics: Vec<String> = topics
                .iter()
                .skip(start)
                .take(topics_per_day)
                .cloned()
                .collect();
            if day_topics.is_empty() {
                if let Some(last) = topics.last() {
                    day_topics.push(last.clone());
                }
            }
            let topic_list = day_topics.join(", ");

            PlanDay {
                day,
                date: String::new(),
                topics: day_topics,
                activities: vec![
                    PlanActivity {
                        activity_type: "reading".to_string(),
                        description: format!("Study {topic_list}"),
                        duration_minutes: block_minutes,
                    },
                    PlanActivity {
                        activity_type: "practice".to_string(),
                        description: "Practice with flashcards and quizzes".to_string(),
                        duration_minutes: block_minutes,
                    },
                ],
                notes: format!("Day {day}: Focus on {topic_list}"),
            }
        })
        .collect();

    RevisionPlan {
        plan_name: format!("{days}-Day Revision Plan"),
        total_days: days,
        hours_per_day,
        schedule,
        tips: vec![
            "Review previous days' material regularly".to_string(),
            "Take breaks between study sessions".to_string(),
            "Test yourself with quizzes and flashcards".to_string(),
            "Get adequate sleep before the exam".to_string(),
        ],
    }
}

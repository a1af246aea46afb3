//! Demo dataset, written through the ordinary store API so every invariant
//! the store enforces holds for seeded data too.

use chrono::{Duration, Utc};
use chronicle_core::{
  fact::{Category, Confidence, Importance, NewFact},
  revision::{NewRevision, RevisionType},
  source::{SourceRef, SourceTier},
  store::{Caller, FactStore, RevisionEffects},
};
use uuid::Uuid;

pub async fn run<S>(store: &S) -> Result<(), S::Error>
where
  S: FactStore,
{
  let editor = Caller::Identified(Uuid::new_v4());
  let now = Utc::now();

  let reuters = SourceRef {
    name: "Reuters".into(),
    url:  Some("https://www.reuters.com".into()),
    tier: SourceTier::Wire,
  };
  let fed = SourceRef {
    name: "Federal Reserve".into(),
    url:  Some("https://www.federalreserve.gov".into()),
    tier: SourceTier::Primary,
  };
  let bloomberg = SourceRef {
    name: "Bloomberg".into(),
    url:  Some("https://www.bloomberg.com".into()),
    tier: SourceTier::Reporting,
  };
  let who = SourceRef {
    name: "WHO".into(),
    url:  Some("https://www.who.int".into()),
    tier: SourceTier::Primary,
  };

  // A fact with a real revision history, seeded oldest-first.
  let rates = store
    .create_fact(
      NewFact {
        headline:      "US federal funds rate".into(),
        current_value: "4.25%".into(),
        category:      Category::Economy,
        importance:    Importance::High,
        confidence:    Confidence::Confirmed,
        tags:          vec!["rates".into(), "fed".into()],
      },
      NewRevision {
        previous_value: None,
        new_value:      "4.25%".into(),
        delta:          "Tracking begins at 4.25%".into(),
        why_it_matters: "The benchmark rate anchors borrowing costs across \
                         the economy."
          .into(),
        revision_type:  RevisionType::Initial,
        recorded_at:    Some(now - Duration::hours(30)),
        source_name:    fed.name.clone(),
        source_url:     fed.url.clone(),
        source_tier:    fed.tier,
      },
      vec![fed.clone(), reuters.clone()],
      editor,
    )
    .await?;

  let _ = store
    .add_revision(
      rates.fact.fact_id,
      NewRevision {
        previous_value: Some("4.25%".into()),
        new_value:      "4.50%".into(),
        delta:          "Raised 25bp at the March meeting".into(),
        why_it_matters: "First hike after three holds; markets had priced a \
                         pause."
          .into(),
        revision_type:  RevisionType::Update,
        recorded_at:    Some(now - Duration::hours(6)),
        source_name:    fed.name.clone(),
        source_url:     fed.url.clone(),
        source_tier:    fed.tier,
      },
      RevisionEffects {
        current_value: Some("4.50%".into()),
        ..RevisionEffects::default()
      },
      editor,
    )
    .await?;

  let inflation = store
    .create_fact(
      NewFact {
        headline:      "US CPI, year over year".into(),
        current_value: "3.1%".into(),
        category:      Category::Economy,
        importance:    Importance::Medium,
        confidence:    Confidence::Confirmed,
        tags:          vec!["inflation".into(), "cpi".into()],
      },
      NewRevision {
        previous_value: None,
        new_value:      "3.1%".into(),
        delta:          "Tracking begins at 3.1%".into(),
        why_it_matters: "Headline inflation drives rate expectations.".into(),
        revision_type:  RevisionType::Initial,
        recorded_at:    Some(now - Duration::hours(20)),
        source_name:    bloomberg.name.clone(),
        source_url:     bloomberg.url.clone(),
        source_tier:    bloomberg.tier,
      },
      vec![bloomberg.clone()],
      editor,
    )
    .await?;

  store
    .link_related(rates.fact.fact_id, inflation.fact.fact_id)
    .await?;

  // A disputed fact, with a correction in its history.
  let outbreak = store
    .create_fact(
      NewFact {
        headline:      "Avian flu cases in dairy herds".into(),
        current_value: "Detected in 9 states".into(),
        category:      Category::Health,
        importance:    Importance::High,
        confidence:    Confidence::Developing,
        tags:          vec!["h5n1".into()],
      },
      NewRevision {
        previous_value: None,
        new_value:      "Detected in 12 states".into(),
        delta:          "Tracking begins with 12 affected states".into(),
        why_it_matters: "Spread in mammals raises pandemic-preparedness \
                         questions."
          .into(),
        revision_type:  RevisionType::Initial,
        recorded_at:    Some(now - Duration::hours(10)),
        source_name:    who.name.clone(),
        source_url:     who.url.clone(),
        source_tier:    who.tier,
      },
      vec![who.clone(), reuters.clone()],
      editor,
    )
    .await?;

  let _ = store
    .add_revision(
      outbreak.fact.fact_id,
      NewRevision {
        previous_value: Some("Detected in 12 states".into()),
        new_value:      "Detected in 9 states".into(),
        delta:          "Three states reclassified after retesting".into(),
        why_it_matters: "Initial counts included false positives; the \
                         corrected figure is lower."
          .into(),
        revision_type:  RevisionType::Correction,
        recorded_at:    Some(now - Duration::hours(2)),
        source_name:    who.name.clone(),
        source_url:     who.url.clone(),
        source_tier:    who.tier,
      },
      RevisionEffects {
        current_value: Some("Detected in 9 states".into()),
        confidence: Some(Confidence::Disputed),
        ..RevisionEffects::default()
      },
      editor,
    )
    .await?;

  store
    .create_fact(
      NewFact {
        headline:      "Black Sea grain corridor status".into(),
        current_value: "Operating under naval escort".into(),
        category:      Category::Geopolitics,
        importance:    Importance::Breaking,
        confidence:    Confidence::Developing,
        tags:          vec!["grain".into(), "shipping".into()],
      },
      NewRevision {
        previous_value: None,
        new_value:      "Operating under naval escort".into(),
        delta:          "Tracking begins; corridor reopened this week".into(),
        why_it_matters: "A quarter of global wheat exports transit the \
                         corridor."
          .into(),
        revision_type:  RevisionType::Initial,
        recorded_at:    Some(now - Duration::hours(1)),
        source_name:    reuters.name.clone(),
        source_url:     reuters.url.clone(),
        source_tier:    reuters.tier,
      },
      vec![reuters],
      editor,
    )
    .await?;

  tracing::info!(
    facts = 4,
    latest = %rates.fact.headline,
    "seeded demo dataset"
  );
  Ok(())
}

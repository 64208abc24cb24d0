use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::catalog::VocabularyCatalog;
use crate::export_spec::{derive_export_spec, ExportSpec};
use crate::metadata::{SceneAnalysis, SceneMetadata};
use crate::normalize::normalize_prompt;
use crate::render_spec::{derive_render_spec, RenderSpec};
use crate::stages::{assemble_stages, Stage};

const BLANK_PROMPT_LEAD: &str =
    "No scene description was provided, so the default production plan applies. / दृश्य वर्णन नाही, डीफॉल्ट योजना लागू.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelinePlan {
    pub summary: String,
    pub metadata: SceneMetadata,
    pub stages: Vec<Stage>,
    pub render: RenderSpec,
    pub export: ExportSpec,
}

impl PipelinePlan {
    /// SHA-256 hex digest of the plan's canonical JSON encoding.
    pub fn fingerprint(&self) -> Result<String> {
        let encoded = serde_json::to_vec(self).context("failed to encode plan for hashing")?;
        Ok(sha256_hex(&encoded))
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Turns scene prompts into pipeline plans using one vocabulary catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanGenerator {
    catalog: VocabularyCatalog,
}

impl PlanGenerator {
    /// Validates `catalog` before use, so every plan field resolves to
    /// non-empty text.
    pub fn new(catalog: VocabularyCatalog) -> Result<Self> {
        catalog
            .validate()
            .context("vocabulary catalog failed validation")?;
        Ok(Self { catalog })
    }

    pub fn builtin() -> Self {
        // validated by the catalog's own tests
        Self {
            catalog: VocabularyCatalog::builtin(),
        }
    }

    pub fn catalog(&self) -> &VocabularyCatalog {
        &self.catalog
    }

    /// Resolves every metadata field of `input` without assembling a plan.
    pub fn analyze(&self, input: &str) -> SceneAnalysis<'_> {
        SceneAnalysis::extract(&self.catalog, &normalize_prompt(input))
    }

    /// Total over all strings: unmatched or empty input degrades to defaults.
    pub fn generate(&self, input: &str) -> PipelinePlan {
        let scene = self.analyze(input);
        tracing::debug!(
            complexity = scene.complexity().as_str(),
            blank = scene.blank,
            "assembling pipeline plan"
        );

        PipelinePlan {
            summary: compose_summary(&scene),
            metadata: scene.metadata(),
            stages: assemble_stages(&scene),
            render: derive_render_spec(&scene),
            export: derive_export_spec(&scene),
        }
    }
}

impl Default for PlanGenerator {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Generates a plan from a scene description with the built-in vocabulary.
pub fn generate_pipeline_plan(input: &str) -> PipelinePlan {
    PlanGenerator::builtin().generate(input)
}

fn compose_summary(scene: &SceneAnalysis<'_>) -> String {
    let body = format!(
        "{location} at {time}, featuring {characters}. Mood: {mood}. Camera: {camera}. FX palette: {fx}. \
The pipeline runs {complexity}-complexity through previs, simulation, lighting, compositing and finishing.",
        location = scene.location().label,
        time = scene.time_of_day().label,
        mood = scene.mood().label,
        characters = scene.characters().label,
        camera = scene.camera().label,
        fx = scene.fx().label,
        complexity = scene.complexity().as_str(),
    );

    if scene.blank {
        format!("{BLANK_PROMPT_LEAD} {body}")
    } else {
        body
    }
}

use std::fmt;

use serde::Serialize;

use vfx_director::metadata::FieldResolution;
use vfx_director::{PipelinePlan, SceneAnalysis, SceneComplexity};

#[derive(Debug, Serialize)]
pub struct PlanEnvelope<'a> {
    pub ok: bool,
    pub fingerprint: String,
    pub plan: &'a PipelinePlan,
}

#[derive(Debug, Serialize)]
pub struct ExplainReport {
    pub ok: bool,
    pub fields: Vec<FieldResolution>,
    pub complexity: SceneComplexity,
}

impl ExplainReport {
    pub fn from_analysis(scene: &SceneAnalysis<'_>) -> Self {
        Self {
            ok: true,
            fields: scene.resolutions(),
            complexity: scene.complexity(),
        }
    }
}

/// Plain-text rendering of every plan field, in display order.
pub struct PlanText<'a>(pub &'a PipelinePlan);

impl fmt::Display for PlanText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;
        let meta = &plan.metadata;

        writeln!(f, "SCENE SUMMARY / मेटाडेटा")?;
        writeln!(f, "{}", plan.summary)?;
        writeln!(f)?;
        for (label, value) in [
            ("Location", &meta.location),
            ("Mood", &meta.mood),
            ("Time", &meta.time_of_day),
            ("Camera", &meta.camera_style),
            ("Characters", &meta.characters),
            ("FX Palette", &meta.fx_palette),
        ] {
            writeln!(f, "  {label:<12} {value}")?;
        }

        for stage in &plan.stages {
            writeln!(f)?;
            writeln!(f, "[{}] {}", stage.id.to_uppercase(), stage.title)?;
            writeln!(f, "  {}", stage.description)?;
            for step in &stage.steps {
                writeln!(f, "  - {step}")?;
            }
            for item in &stage.technical {
                writeln!(f, "    {}: {}", item.label, item.value)?;
            }
        }

        let render = &plan.render;
        writeln!(f)?;
        writeln!(f, "RENDER SPECS")?;
        for (label, value) in [
            ("Resolution", &render.resolution),
            ("Frame Rate", &render.frame_rate),
            ("Samples", &render.samples),
            ("Renderer", &render.renderer),
            ("Passes", &render.passes),
            ("Color Space", &render.color_space),
            ("File Naming", &render.file_naming),
        ] {
            writeln!(f, "  {label:<12} {value}")?;
        }

        let export = &plan.export;
        writeln!(f)?;
        writeln!(f, "FINAL EXPORTS")?;
        writeln!(f, "  {:<12} {}", "Format", export.format)?;
        writeln!(f, "  {:<12} {}", "Codec", export.codec)?;
        for deliverable in &export.deliverables {
            writeln!(f, "  {:<12} {}", "Deliverable", deliverable)?;
        }
        writeln!(f, "  {:<12} {}", "Optimization", export.optimization)
    }
}

impl fmt::Display for ExplainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.fields {
            match row.cue.as_deref() {
                Some(cue) => writeln!(f, "{:<12} {}  <- cue \"{cue}\"", row.field, row.value)?,
                None => writeln!(f, "{:<12} {}  <- fallback", row.field, row.value)?,
            }
        }
        writeln!(f, "{:<12} {}", "complexity", self.complexity.as_str())
    }
}

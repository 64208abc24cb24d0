use serde::{Deserialize, Serialize};

use crate::catalog::FxIntensity;
use crate::metadata::{SceneAnalysis, SceneComplexity};

const BASE_DELIVERABLES: [&str; 3] = [
    "Final master (ProRes 4444 XQ, UHD)",
    "Review proxy (H.264 1080p, burnt-in timecode)",
    "Shot EXR plates (16-bit half, ACEScg)",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSpec {
    pub format: String,
    pub codec: String,
    pub deliverables: Vec<String>,
    pub optimization: String,
}

pub fn derive_export_spec(scene: &SceneAnalysis<'_>) -> ExportSpec {
    let complexity = scene.complexity();
    let fx = scene.fx();

    let mut deliverables = Vec::new();
    for deliverable in BASE_DELIVERABLES {
        push_unique(&mut deliverables, deliverable.to_owned());
    }
    if complexity >= SceneComplexity::Elevated {
        push_unique(
            &mut deliverables,
            format!("VFX breakdown reel ({})", fx.label),
        );
    }
    if fx.intensity == FxIntensity::Heavy {
        push_unique(
            &mut deliverables,
            "Simulation cache archive (VDB, bgeo.sc)".to_owned(),
        );
    }
    if scene.camera().stabilization {
        push_unique(
            &mut deliverables,
            "Solved camera track (Alembic + FBX)".to_owned(),
        );
    }

    let optimization = match complexity {
        SceneComplexity::Standard => {
            "Farm chunks of 10 frames, OIDN denoise in comp, DWAA-compressed EXRs"
        }
        SceneComplexity::Elevated => {
            "Farm chunks of 5 frames, cache sims before lighting, OIDN denoise per light group, DWAA-compressed EXRs"
        }
        SceneComplexity::Heavy => {
            "Farm chunks of 2 frames, pre-bake volumes to VDB at half-res for lookdev, sims on NVMe scratch, OIDN denoise per light group, DWAA-compressed EXRs"
        }
    };

    ExportSpec {
        format: "OpenEXR multichannel master + QuickTime MOV review".to_owned(),
        codec: "ProRes 4444 XQ (master), H.264 High 4:2:0 (review)".to_owned(),
        deliverables,
        optimization: optimization.to_owned(),
    }
}

fn push_unique(deliverables: &mut Vec<String>, deliverable: String) {
    if !deliverables.contains(&deliverable) {
        deliverables.push(deliverable);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::catalog::VocabularyCatalog;
    use crate::normalize::normalize_prompt;

    fn export_for(prompt: &str) -> ExportSpec {
        let catalog = VocabularyCatalog::builtin();
        let scene = SceneAnalysis::extract(&catalog, &normalize_prompt(prompt));
        derive_export_spec(&scene)
    }

    #[test]
    fn default_scene_gets_base_deliverables_only() {
        let spec = export_for("");
        assert_eq!(spec.deliverables, BASE_DELIVERABLES.map(str::to_owned).to_vec());
    }

    #[test]
    fn heavy_fx_adds_breakdown_and_cache_archive() {
        let spec = export_for("sandstorm titan");
        assert!(spec
            .deliverables
            .iter()
            .any(|item| item.starts_with("VFX breakdown reel")));
        assert!(spec
            .deliverables
            .iter()
            .any(|item| item.starts_with("Simulation cache archive")));
    }

    #[test]
    fn moving_camera_adds_camera_track() {
        let spec = export_for("steadicam glide");
        assert!(spec
            .deliverables
            .iter()
            .any(|item| item.contains("camera track")));
    }

    #[test]
    fn deliverables_are_distinct() {
        let spec = export_for("handheld firestorm chase at dusk");
        let unique = spec.deliverables.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), spec.deliverables.len());
    }
}

use serde::{Deserialize, Serialize};

use crate::metadata::{SceneAnalysis, SceneComplexity};
use crate::normalize::slugify;

const BASE_WIDTH: u32 = 3840;
const BASE_HEIGHT: u32 = 2160;

const STANDARD_PASSES: [&str; 6] = [
    "Beauty",
    "Diffuse",
    "Specular",
    "Emission",
    "Z-depth",
    "Cryptomatte",
];
const ELEVATED_PASSES: [&str; 2] = ["Volume", "Motion vectors"];
const HEAVY_PASSES: [&str; 2] = ["Light groups", "Deep"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSpec {
    pub resolution: String,
    pub frame_rate: String,
    pub samples: String,
    pub renderer: String,
    pub passes: String,
    pub color_space: String,
    pub file_naming: String,
}

impl RenderSpec {
    /// Leading sample count of `samples`, for comparing tiers.
    pub fn sample_count(&self) -> Option<u32> {
        let digits = self
            .samples
            .chars()
            .take_while(char::is_ascii_digit)
            .collect::<String>();
        digits.parse().ok()
    }
}

pub fn samples_per_pixel(complexity: SceneComplexity) -> u32 {
    match complexity {
        SceneComplexity::Standard => 256,
        SceneComplexity::Elevated => 512,
        SceneComplexity::Heavy => 1024,
    }
}

/// Render passes for a tier. Heavier tiers only ever append.
pub fn render_passes(complexity: SceneComplexity) -> Vec<&'static str> {
    let mut passes = STANDARD_PASSES.to_vec();
    if complexity >= SceneComplexity::Elevated {
        passes.extend(ELEVATED_PASSES);
    }
    if complexity >= SceneComplexity::Heavy {
        passes.extend(HEAVY_PASSES);
    }
    passes
}

fn overscanned(extent: u32, percent: u32) -> u32 {
    extent.saturating_add(extent.saturating_mul(percent) / 100)
}

pub fn derive_render_spec(scene: &SceneAnalysis<'_>) -> RenderSpec {
    let complexity = scene.complexity();
    let camera = scene.camera();
    let mood = scene.mood();

    let resolution = if camera.overscan_percent > 0 {
        let width = overscanned(BASE_WIDTH, camera.overscan_percent);
        let height = overscanned(BASE_HEIGHT, camera.overscan_percent);
        format!(
            "{BASE_WIDTH}x{BASE_HEIGHT} UHD delivery, rendered at {width}x{height} ({}% overscan)",
            camera.overscan_percent
        )
    } else {
        format!("{BASE_WIDTH}x{BASE_HEIGHT} UHD")
    };

    let frame_rate = if mood.charged || camera.stabilization {
        "24 fps, 90° shutter for crisp kinetic motion".to_owned()
    } else {
        "24 fps, 180° shutter".to_owned()
    };

    let samples = match complexity {
        SceneComplexity::Standard => format!("{} spp", samples_per_pixel(complexity)),
        SceneComplexity::Elevated => format!(
            "{} spp, adaptive threshold 0.01",
            samples_per_pixel(complexity)
        ),
        SceneComplexity::Heavy => format!(
            "{} spp, adaptive threshold 0.005, 16 volume samples",
            samples_per_pixel(complexity)
        ),
    };

    let renderer = match complexity {
        SceneComplexity::Standard => "Arnold GPU",
        SceneComplexity::Elevated => "Arnold GPU with tuned volume step",
        SceneComplexity::Heavy => "Karma XPU (Houdini Solaris) for heavy volumetrics",
    };

    let location_slug = slugify(&scene.location().label, "set");
    let mood_slug = slugify(&mood.label, "mood");

    RenderSpec {
        resolution,
        frame_rate,
        samples,
        renderer: renderer.to_owned(),
        passes: render_passes(complexity).join(", "),
        color_space: "ACEScg working space, ACES 1.3 output transforms".to_owned(),
        file_naming: format!("{location_slug}_{mood_slug}_sh010_{{pass}}_v001.####.exr"),
    }
}

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::cue::{CueRule, CueTable, CueValue};

pub const CATALOG_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FxIntensity {
    Subtle,
    Moderate,
    Heavy,
}

impl FxIntensity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subtle => "subtle",
            Self::Moderate => "moderate",
            Self::Heavy => "heavy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationProfile {
    pub label: String,
    /// Proxy set dressing blocked in during previs.
    pub set_dressing: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeProfile {
    pub label: String,
    pub light_rig: String,
    pub color_temperature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodProfile {
    pub label: String,
    /// High-energy moods push simulation turbulence and the complexity tier.
    #[serde(default)]
    pub charged: bool,
    pub palette: String,
    pub contrast: String,
    pub comp_treatment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraProfile {
    pub label: String,
    pub lens: String,
    pub previs_step: String,
    /// Moving cameras need a solved track delivered alongside the plates.
    #[serde(default)]
    pub stabilization: bool,
    #[serde(default)]
    pub overscan_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub label: String,
    pub asset_note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FxProfile {
    pub label: String,
    pub intensity: FxIntensity,
    pub solver: String,
    pub resolution: String,
    /// Emissive effects cast interactive light onto the plate.
    #[serde(default)]
    pub emissive: bool,
    pub steps: Vec<String>,
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("'{field}' must not be empty");
    }
    Ok(())
}

impl CueValue for LocationProfile {
    fn label(&self) -> &str {
        &self.label
    }

    fn validate(&self) -> Result<()> {
        require_text("set_dressing", &self.set_dressing)
    }
}

impl CueValue for TimeProfile {
    fn label(&self) -> &str {
        &self.label
    }

    fn validate(&self) -> Result<()> {
        require_text("light_rig", &self.light_rig)?;
        require_text("color_temperature", &self.color_temperature)
    }
}

impl CueValue for MoodProfile {
    fn label(&self) -> &str {
        &self.label
    }

    fn validate(&self) -> Result<()> {
        require_text("palette", &self.palette)?;
        require_text("contrast", &self.contrast)?;
        require_text("comp_treatment", &self.comp_treatment)
    }
}

impl CueValue for CameraProfile {
    fn label(&self) -> &str {
        &self.label
    }

    fn validate(&self) -> Result<()> {
        require_text("lens", &self.lens)?;
        require_text("previs_step", &self.previs_step)?;
        if self.overscan_percent > 50 {
            bail!(
                "'overscan_percent' must be at most 50, got {}",
                self.overscan_percent
            );
        }
        Ok(())
    }
}

impl CueValue for CharacterProfile {
    fn label(&self) -> &str {
        &self.label
    }

    fn validate(&self) -> Result<()> {
        require_text("asset_note", &self.asset_note)
    }
}

impl CueValue for FxProfile {
    fn label(&self) -> &str {
        &self.label
    }

    fn validate(&self) -> Result<()> {
        require_text("solver", &self.solver)?;
        require_text("resolution", &self.resolution)?;
        if self.steps.is_empty() {
            bail!("'steps' must list at least one simulation step");
        }
        if self.steps.iter().any(|step| step.trim().is_empty()) {
            bail!("'steps' must not contain blank entries");
        }
        Ok(())
    }
}

/// Cue vocabularies and production profiles consulted by the plan generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VocabularyCatalog {
    #[serde(default = "default_catalog_version")]
    pub version: u32,
    pub location: CueTable<LocationProfile>,
    pub time_of_day: CueTable<TimeProfile>,
    pub mood: CueTable<MoodProfile>,
    pub camera_style: CueTable<CameraProfile>,
    pub characters: CueTable<CharacterProfile>,
    pub fx_palette: CueTable<FxProfile>,
}

fn default_catalog_version() -> u32 {
    CATALOG_VERSION
}

impl VocabularyCatalog {
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let mut catalog: Self = serde_yaml::from_str(contents).map_err(|error| {
            let location = error
                .location()
                .map(|location| format!("line {}, column {}", location.line(), location.column()))
                .unwrap_or_else(|| "unknown location".to_owned());
            anyhow!("failed to parse catalog yaml at {}: {}", location, error)
        })?;
        catalog.normalize_cues();
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("invalid catalog {}", path.display()))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("failed to serialize catalog")
    }

    pub fn normalize_cues(&mut self) {
        self.location.normalize_cues();
        self.time_of_day.normalize_cues();
        self.mood.normalize_cues();
        self.camera_style.normalize_cues();
        self.characters.normalize_cues();
        self.fx_palette.normalize_cues();
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != CATALOG_VERSION {
            bail!(
                "unsupported catalog version {} (expected {})",
                self.version,
                CATALOG_VERSION
            );
        }
        self.location.validate("location")?;
        self.time_of_day.validate("time_of_day")?;
        self.mood.validate("mood")?;
        self.camera_style.validate("camera_style")?;
        self.characters.validate("characters")?;
        self.fx_palette.validate("fx_palette")?;
        Ok(())
    }

    /// The curated English + Marathi vocabulary.
    pub fn builtin() -> Self {
        Self {
            version: CATALOG_VERSION,
            location: builtin_locations(),
            time_of_day: builtin_times(),
            mood: builtin_moods(),
            camera_style: builtin_cameras(),
            characters: builtin_characters(),
            fx_palette: builtin_fx(),
        }
    }
}

impl Default for VocabularyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn location(label: &str, set_dressing: &str) -> LocationProfile {
    LocationProfile {
        label: label.to_owned(),
        set_dressing: set_dressing.to_owned(),
    }
}

fn builtin_locations() -> CueTable<LocationProfile> {
    CueTable::new(
        vec![
            CueRule::new(
                &["alley", "bylane", "street", "bazaar", "गल्ली", "बोळ", "रस्ता", "बाजार"],
                location(
                    "Urban alleyway (शहरी गल्ली)",
                    "Modular alley kit: wet asphalt, signage cards, cable clutter",
                ),
            )
            .with_words(&["lane", "lanes", "market", "markets", "marketplace"]),
            CueRule::new(
                &["temple", "courtyard", "shrine", "मंदिर", "देऊळ", "प्रांगण"],
                location(
                    "Ancient temple courtyard (प्राचीन मंदिर प्रांगण)",
                    "Carved stone pillars, lamp niches, courtyard flagstones",
                ),
            ),
            CueRule::new(
                &["desert", "dune", "wasteland", "वाळवंट"],
                location(
                    "Desert expanse (वाळवंट)",
                    "Procedural dune terrain with scatter rocks and heat-haze cards",
                ),
            ),
            CueRule::new(
                &["forest", "jungle", "woods", "जंगल", "अरण्य"],
                location(
                    "Dense forest (घनदाट जंगल)",
                    "Instanced tree canopy, ground cover scatter, volumetric light shafts",
                ),
            ),
            CueRule::new(
                &["ocean", "beach", "coastline", "coastal", "harbour", "harbor", "समुद्र", "किनारा"],
                location(
                    "Coastal seascape (समुद्रकिनारा)",
                    "Ocean surface proxy, shoreline rocks, horizon matte painting",
                ),
            )
            .with_words(&["coast", "coasts"]),
            CueRule::new(
                &["mountain", "cliff", "peak", "himalaya", "पर्वत", "डोंगर"],
                location(
                    "Mountain ridge (डोंगररांग)",
                    "Heightfield ridge, rock cliffs, layered distant range cards",
                ),
            ),
            CueRule::new(
                &["city", "skyline", "rooftop", "metropolis", "mumbai", "शहर", "मुंबई"],
                location(
                    "Metropolitan skyline (महानगर)",
                    "Building blockout with window emissive cards and rooftop props",
                ),
            ),
            CueRule::new(
                &["space", "orbit", "galaxy", "spaceship", "अंतराळ"],
                location(
                    "Orbital void (अंतराळ)",
                    "Star field dome, planet limb, hull proxy geometry",
                ),
            ),
        ],
        location(
            "Versatile studio backlot (स्टुडिओ सेट)",
            "Neutral blockout set with placeholder walls and ground plane",
        ),
    )
}

fn time(label: &str, light_rig: &str, color_temperature: &str) -> TimeProfile {
    TimeProfile {
        label: label.to_owned(),
        light_rig: light_rig.to_owned(),
        color_temperature: color_temperature.to_owned(),
    }
}

fn builtin_times() -> CueTable<TimeProfile> {
    CueTable::new(
        vec![
            CueRule::new(
                &["midnight", "मध्यरात्र"],
                time(
                    "Midnight (मध्यरात्र)",
                    "Cool moonlight key with practical-driven fill",
                    "4100K moon key, 2700K practicals",
                ),
            ),
            CueRule::new(
                &["dawn", "sunrise", "daybreak", "पहाट", "सूर्योदय"],
                time(
                    "Dawn golden hour (पहाट)",
                    "Low raking sun with soft sky dome fill",
                    "3200K sun, 7500K sky",
                ),
            ),
            CueRule::new(
                &["dusk", "sunset", "twilight", "संध्याकाळ", "सूर्यास्त"],
                time(
                    "Dusk magic hour (संध्याकाळ)",
                    "Backlit sun at horizon with warm rim and cool ambient",
                    "2800K sun rim, 9000K ambient",
                ),
            ),
            CueRule::new(
                &["night", "moonlit", "रात्र"],
                time(
                    "Night (रात्र)",
                    "Low-level moonlight with motivated practicals",
                    "4300K moon, 3000K practicals",
                ),
            ),
            CueRule::new(
                &["noon", "midday", "दुपार"],
                time(
                    "High noon (दुपार)",
                    "Hard overhead sun with bounce fill",
                    "5600K sun",
                ),
            ),
            CueRule::new(
                &["morning", "सकाळ"],
                time(
                    "Morning (सकाळ)",
                    "Soft angled sun with clear sky fill",
                    "4800K sun, 6500K sky",
                ),
            ),
        ],
        time(
            "Neutral daylight (दिवस)",
            "Balanced HDRI dome with soft key",
            "5600K daylight",
        ),
    )
}

fn mood(label: &str, charged: bool, palette: &str, contrast: &str, comp_treatment: &str) -> MoodProfile {
    MoodProfile {
        label: label.to_owned(),
        charged,
        palette: palette.to_owned(),
        contrast: contrast.to_owned(),
        comp_treatment: comp_treatment.to_owned(),
    }
}

fn builtin_moods() -> CueTable<MoodProfile> {
    CueTable::new(
        vec![
            CueRule::new(
                &["chase", "pursuit", "tense", "thriller", "suspense", "पाठलाग", "तणाव"],
                mood(
                    "Tense pursuit (तणावपूर्ण पाठलाग)",
                    true,
                    "Teal shadows with sodium-orange highlights",
                    "High contrast, crushed blacks",
                    "Motion blur matching, lens breathing, kinetic light streaks",
                ),
            ),
            CueRule::new(
                &["battle", "warrior", "warfare", "युद्ध", "लढाई"],
                mood(
                    "Epic confrontation (महायुद्ध)",
                    true,
                    "Bronze midtones with ember accents",
                    "High contrast with lifted atmosphere",
                    "Layered atmospherics, debris passes, heroic lens flares",
                ),
            )
            .with_words(&["epic", "titan", "titans"]),
            CueRule::new(
                &["mythic", "divine", "sacred", "spiritual", "ritual", "पौराणिक", "दैवी"],
                mood(
                    "Mythic reverence (पौराणिक)",
                    false,
                    "Saffron and gold with deep stone shadows",
                    "Medium contrast, glowing highlights",
                    "Soft bloom, god rays, floating particulate",
                ),
            ),
            CueRule::new(
                &["horror", "eerie", "haunted", "creepy", "भयावह", "भीती"],
                mood(
                    "Eerie dread (भयावह)",
                    false,
                    "Desaturated greens with sickly highlights",
                    "Low-key, deep shadows",
                    "Vignetting, subtle chromatic aberration, flicker",
                ),
            ),
            CueRule::new(
                &["melancholy", "lonely", "grief", "sorrow", "उदास", "दुःख"],
                mood(
                    "Melancholic (उदास)",
                    false,
                    "Muted blues and slate greys",
                    "Low contrast, soft roll-off",
                    "Haze diffusion, gentle grain",
                ),
            ),
            CueRule::new(
                &["romantic", "lovers", "प्रेम"],
                mood(
                    "Romantic warmth (प्रेमळ)",
                    false,
                    "Warm peach and rose tones",
                    "Soft contrast, glowing skin tones",
                    "Pro-mist diffusion, bokeh enhancement",
                ),
            )
            .with_words(&["love", "loving"]),
            CueRule::new(
                &["neon", "cyberpunk", "cybernetic", "futuristic", "निऑन"],
                mood(
                    "Neo-noir futurism (निऑन नॉयर)",
                    false,
                    "Magenta and cyan neon over inky blacks",
                    "High contrast with specular pops",
                    "Neon bloom, light wrap, wet-surface reflections",
                ),
            ),
        ],
        mood(
            "Cinematic drama (नाट्यमय)",
            false,
            "Naturalistic filmic palette",
            "Medium contrast",
            "Filmic grain and gentle halation",
        ),
    )
}

fn camera(
    label: &str,
    lens: &str,
    previs_step: &str,
    stabilization: bool,
    overscan_percent: u32,
) -> CameraProfile {
    CameraProfile {
        label: label.to_owned(),
        lens: lens.to_owned(),
        previs_step: previs_step.to_owned(),
        stabilization,
        overscan_percent,
    }
}

fn builtin_cameras() -> CueTable<CameraProfile> {
    CueTable::new(
        vec![
            CueRule::new(
                &["handheld", "hand-held", "shaky", "हँडहेल्ड"],
                camera(
                    "Handheld kinetic (हँडहेल्ड)",
                    "27mm spherical, T2.8",
                    "Layout handheld camera with procedural shake (2-4 Hz) baked into the animatic",
                    true,
                    10,
                ),
            ),
            CueRule::new(
                &["steadicam", "gimbal", "स्टेडीकॅम"],
                camera(
                    "Steadicam glide (स्टेडीकॅम)",
                    "35mm spherical, T2.0",
                    "Block a steadicam glide path with eased velocity curves",
                    true,
                    5,
                ),
            ),
            CueRule::new(
                &["dolly", "push-in", "push in", "tracking shot", "डॉली"],
                camera(
                    "Dolly push (डॉली)",
                    "50mm anamorphic, T2.3",
                    "Lay a dolly track and time the push-in against the action beats",
                    false,
                    0,
                ),
            ),
            CueRule::new(
                &["aerial", "crane", "drone shot", "overhead", "bird's-eye", "एरियल"],
                camera(
                    "Aerial crane sweep (एरियल)",
                    "18mm wide, T4",
                    "Plot an aerial crane sweep with terrain clearance checks",
                    true,
                    8,
                ),
            ),
            CueRule::new(
                &["static", "locked-off", "tripod", "स्थिर"],
                camera(
                    "Locked-off tripod (स्थिर)",
                    "40mm spherical, T2.8",
                    "Frame a locked-off composition with safe-area guides",
                    false,
                    0,
                ),
            ),
        ],
        camera(
            "Classic cinematic coverage (क्लासिक कव्हरेज)",
            "35mm spherical, T2.8",
            "Block master, medium and close-up coverage in the animatic",
            false,
            0,
        ),
    )
}

fn character(label: &str, asset_note: &str) -> CharacterProfile {
    CharacterProfile {
        label: label.to_owned(),
        asset_note: asset_note.to_owned(),
    }
}

fn builtin_characters() -> CueTable<CharacterProfile> {
    CueTable::new(
        vec![
            CueRule::new(
                &["priestess", "priest", "पुजारी", "साधू"],
                character(
                    "Ritual priest/priestess (पुजारी)",
                    "Digital double with cloth sim robes and hair groom",
                ),
            )
            .with_words(&["sage", "sages", "monk", "monks"]),
            CueRule::new(
                &["warrior", "soldier", "knight", "armored", "armoured", "योद्धा", "सैनिक"],
                character(
                    "Armored warrior (योद्धा)",
                    "Hero armor rig with secondary plate dynamics",
                ),
            ),
            CueRule::new(
                &["detective", "investigator", "गुप्तहेर"],
                character(
                    "Detective lead (गुप्तहेर)",
                    "Performance capture lead with trench coat cloth sim",
                ),
            )
            .with_words(&["cop", "cops"]),
            CueRule::new(
                &["robot", "drone", "android", "cyborg", "यंत्रमानव"],
                character(
                    "Synthetic antagonist (यंत्रमानव)",
                    "Hard-surface rig with emissive panel shaders",
                ),
            )
            .with_words(&["mech", "mechs"]),
            CueRule::new(
                &["dragon", "phoenix", "creature", "monster", "beast", "राक्षस"],
                character(
                    "CG creature (काल्पनिक प्राणी)",
                    "Creature rig with muscle sim and feather/scale grooming",
                ),
            ),
            CueRule::new(
                &["crowd", "army", "villagers", "गर्दी", "सेना"],
                character(
                    "Crowd ensemble (गर्दी)",
                    "Agent-based crowd with variant library",
                ),
            ),
        ],
        character(
            "Lead performer (मुख्य पात्र)",
            "Plate-photographed performer with roto-ready wardrobe",
        ),
    )
}

fn fx(
    label: &str,
    intensity: FxIntensity,
    solver: &str,
    resolution: &str,
    emissive: bool,
    steps: &[&str],
) -> FxProfile {
    FxProfile {
        label: label.to_owned(),
        intensity,
        solver: solver.to_owned(),
        resolution: resolution.to_owned(),
        emissive,
        steps: steps.iter().map(|step| (*step).to_owned()).collect(),
    }
}

fn builtin_fx() -> CueTable<FxProfile> {
    CueTable::new(
        vec![
            CueRule::new(
                &["sandstorm", "dust storm", "वाळूचे वादळ", "धुळीचे वादळ"],
                fx(
                    "Sandstorm particulate (वाळूवादळ)",
                    FxIntensity::Heavy,
                    "Pyro sparse solver coupled with 40M-point POP grains",
                    "Voxel 0.05m, 120M particles",
                    false,
                    &[
                        "Simulate the storm wall as a sparse pyro density field",
                        "Advect grain particles through the storm velocity field",
                        "Cache wisps and near-camera grit as separate layers",
                    ],
                ),
            ),
            CueRule::new(
                &["firestorm", "fireball", "inferno", "ember", "ज्वाला", "अग्नी", "आगीत", "आगीच्या"],
                fx(
                    "Fire & embers (अग्नी)",
                    FxIntensity::Heavy,
                    "Pyro sparse solver with ember POP sourcing",
                    "Voxel 0.02m hero, 0.08m background",
                    true,
                    &[
                        "Source fuel and temperature from emitter geometry",
                        "Simulate hero flames with heavy turbulence and disturbance",
                        "Spawn embers from high-temperature voxels and cache as points",
                    ],
                ),
            )
            .with_words(&[
                "fire", "fires", "blaze", "blazes", "blazing", "flame", "flames", "flaming", "आग",
            ]),
            CueRule::new(
                &["lightning", "thunder", "storm", "वीज", "वादळ"],
                fx(
                    "Lightning & storm energy (वीज)",
                    FxIntensity::Heavy,
                    "Procedural L-system bolts with pyro storm clouds",
                    "Voxel 0.1m clouds, curve bolts",
                    true,
                    &[
                        "Grow branching bolts procedurally and time strikes to the edit",
                        "Simulate rolling storm clouds with internal flash lighting",
                    ],
                ),
            ),
            CueRule::new(
                &["explosion", "debris", "destruction", "collapse", "स्फोट"],
                fx(
                    "Destruction & debris (स्फोट)",
                    FxIntensity::Heavy,
                    "RBD Bullet solver with pyro fireball and dust",
                    "Fracture 50k pieces, voxel 0.04m",
                    true,
                    &[
                        "Pre-fracture hero geometry with material-aware patterns",
                        "Run RBD destruction with constraint networks",
                        "Layer secondary dust and fireball pyro",
                    ],
                ),
            ),
            CueRule::new(
                &["magic", "arcane", "spellcast", "portal", "energy", "जादू", "ऊर्जा"],
                fx(
                    "Arcane energy (जादुई ऊर्जा)",
                    FxIntensity::Moderate,
                    "Particle trails with curl noise and volumetric glow",
                    "8M particles, rasterized at 0.03m",
                    true,
                    &[
                        "Drive energy trails with curl noise along guide curves",
                        "Rasterize particles into glow volumes for rendering",
                    ],
                ),
            )
            .with_words(&["spell", "spells"]),
            CueRule::new(
                &["tsunami", "waterfall", "splash", "पाणी"],
                fx(
                    "Fluid water sim (जलप्रवाह)",
                    FxIntensity::Moderate,
                    "FLIP solver with whitewater",
                    "Particle separation 0.03m",
                    false,
                    &[
                        "Simulate the hero fluid body with FLIP",
                        "Generate whitewater spray, foam and bubbles",
                        "Mesh the surface with VDB smoothing",
                    ],
                ),
            )
            .with_words(&[
                "water", "wave", "waves", "flood", "floods", "flooded", "flooding", "लाट", "लाटा", "पूर",
            ]),
            CueRule::new(
                &["snow", "blizzard", "frost", "बर्फ", "हिमवर्षाव"],
                fx(
                    "Snow & ice particles (बर्फ)",
                    FxIntensity::Moderate,
                    "POP snowfall with wind fields",
                    "5M particles",
                    false,
                    &[
                        "Emit snowfall with layered wind turbulence",
                        "Accumulate ground snow as a displacement pass",
                    ],
                ),
            )
            .with_words(&["ice", "icy", "हिम"]),
            CueRule::new(
                &["smoke", "fog", "धूर", "धुके"],
                fx(
                    "Volumetric smoke & fog (धूर)",
                    FxIntensity::Subtle,
                    "Pyro smoke-only solver",
                    "Voxel 0.1m",
                    false,
                    &["Simulate low-lying smoke and fog banks as a density field"],
                ),
            )
            .with_words(&["mist", "mists", "misty", "haze", "hazy"]),
        ],
        fx(
            "Subtle atmospherics (सूक्ष्म वातावरण)",
            FxIntensity::Subtle,
            "Sprite-based atmospherics and dust motes",
            "2M particles",
            false,
            &["Add light atmospheric dust motes and depth haze"],
        ),
    )
}

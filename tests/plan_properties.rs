use std::collections::HashSet;

use vfx_director::{generate_pipeline_plan, PipelinePlan, PlanGenerator, StageId, VocabularyCatalog};

const MUMBAI: &str = "Monsoon-drenched Mumbai alley at midnight, chase between a cybernetic detective and a rogue drone, neon reflections, handheld camera.";
const TEMPLE: &str = "Mythic temple courtyard at dawn with a fire priestess summoning a phoenix of embers while rain cools the stone, sweeping steadicam.";
const DESERT: &str = "Desert battlefield at dusk, armored warrior vs sandstorm titan, dramatic dolly push with arcane lightning.";

fn awkward_inputs() -> Vec<String> {
    vec![
        String::new(),
        " ".to_owned(),
        "\n\t  \r\n".to_owned(),
        "zxqv blorp 12345 !!!".to_owned(),
        "🔥🌪️✨".to_owned(),
        "मध्यरात्री वाळवंटात आग आणि वादळ".to_owned(),
        "\u{0}\u{7}control".to_owned(),
        MUMBAI.repeat(500),
        "a ".repeat(20_000),
        MUMBAI.to_owned(),
        TEMPLE.to_owned(),
        DESERT.to_owned(),
    ]
}

fn assert_fully_populated(plan: &PipelinePlan) {
    assert!(!plan.summary.trim().is_empty());

    let meta = &plan.metadata;
    for value in [
        &meta.location,
        &meta.mood,
        &meta.time_of_day,
        &meta.camera_style,
        &meta.characters,
        &meta.fx_palette,
    ] {
        assert!(!value.trim().is_empty(), "empty metadata field in {meta:?}");
    }

    assert!(!plan.stages.is_empty());
    for stage in &plan.stages {
        assert!(!stage.id.is_empty());
        assert!(!stage.title.trim().is_empty());
        assert!(!stage.description.trim().is_empty());
        assert!(!stage.steps.is_empty(), "stage {} has no steps", stage.id);
        assert!(!stage.technical.is_empty(), "stage {} has no technical items", stage.id);
        assert!(stage.steps.iter().all(|step| !step.trim().is_empty()));
        assert!(stage
            .technical
            .iter()
            .all(|item| !item.label.trim().is_empty() && !item.value.trim().is_empty()));
    }

    let render = &plan.render;
    for value in [
        &render.resolution,
        &render.frame_rate,
        &render.samples,
        &render.renderer,
        &render.passes,
        &render.color_space,
        &render.file_naming,
    ] {
        assert!(!value.trim().is_empty());
    }
    assert!(render.sample_count().is_some(), "samples not numeric: {}", render.samples);

    let export = &plan.export;
    assert!(!export.format.trim().is_empty());
    assert!(!export.codec.trim().is_empty());
    assert!(!export.optimization.trim().is_empty());
    assert!(!export.deliverables.is_empty());
    let unique = export.deliverables.iter().collect::<HashSet<_>>();
    assert_eq!(unique.len(), export.deliverables.len(), "duplicate deliverables");
}

#[test]
fn every_input_yields_a_fully_populated_plan() {
    for input in awkward_inputs() {
        assert_fully_populated(&generate_pipeline_plan(&input));
    }
}

#[test]
fn generation_is_deterministic() {
    for input in awkward_inputs() {
        assert_eq!(generate_pipeline_plan(&input), generate_pipeline_plan(&input));
    }
}

#[test]
fn concurrent_generation_matches_sequential() {
    let generator = PlanGenerator::builtin();
    let expected = generator.generate(DESERT);
    std::thread::scope(|scope| {
        let handles = (0..4)
            .map(|_| scope.spawn(|| generator.generate(DESERT)))
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().expect("worker panicked"), expected);
        }
    });
}

#[test]
fn stage_ids_are_identical_for_every_input() {
    let expected = StageId::ALL
        .iter()
        .map(|id| id.slug().to_owned())
        .collect::<Vec<_>>();
    for input in awkward_inputs() {
        let ids = generate_pipeline_plan(&input)
            .stages
            .into_iter()
            .map(|stage| stage.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, expected);
    }
}

#[test]
fn blank_input_uses_every_default() {
    let catalog = VocabularyCatalog::builtin();
    let plan = generate_pipeline_plan("   ");
    assert_eq!(plan.metadata.location, catalog.location.fallback.label);
    assert_eq!(plan.metadata.mood, catalog.mood.fallback.label);
    assert_eq!(plan.metadata.time_of_day, catalog.time_of_day.fallback.label);
    assert_eq!(plan.metadata.camera_style, catalog.camera_style.fallback.label);
    assert_eq!(plan.metadata.characters, catalog.characters.fallback.label);
    assert_eq!(plan.metadata.fx_palette, catalog.fx_palette.fallback.label);
}

#[test]
fn location_cue_selects_catalog_value() {
    let catalog = VocabularyCatalog::builtin();
    let desert = catalog
        .location
        .rules
        .iter()
        .find(|rule| rule.cues.iter().any(|cue| cue == "desert"))
        .expect("desert rule");

    assert_eq!(
        generate_pipeline_plan("a lone rider crosses the desert").metadata.location,
        desert.value.label
    );
    assert_eq!(
        generate_pipeline_plan("a lone rider, nowhere in particular").metadata.location,
        catalog.location.fallback.label
    );
}

#[test]
fn mumbai_sample_resolves_documented_fields() {
    let catalog = VocabularyCatalog::builtin();
    let plan = generate_pipeline_plan(MUMBAI);

    assert_eq!(plan.metadata.time_of_day, "Midnight (मध्यरात्र)");
    assert_eq!(plan.metadata.camera_style, "Handheld kinetic (हँडहेल्ड)");
    assert_eq!(plan.metadata.location, "Urban alleyway (शहरी गल्ली)");
    assert_eq!(plan.metadata.fx_palette, catalog.fx_palette.fallback.label);
}

#[test]
fn temple_and_desert_samples_resolve_elemental_fx() {
    let temple = generate_pipeline_plan(TEMPLE);
    assert_eq!(temple.metadata.location, "Ancient temple courtyard (प्राचीन मंदिर प्रांगण)");
    assert_eq!(temple.metadata.time_of_day, "Dawn golden hour (पहाट)");
    assert_eq!(temple.metadata.camera_style, "Steadicam glide (स्टेडीकॅम)");
    assert_eq!(temple.metadata.fx_palette, "Fire & embers (अग्नी)");

    let desert = generate_pipeline_plan(DESERT);
    assert_eq!(desert.metadata.location, "Desert expanse (वाळवंट)");
    assert_eq!(desert.metadata.time_of_day, "Dusk magic hour (संध्याकाळ)");
    assert_eq!(desert.metadata.camera_style, "Dolly push (डॉली)");
    assert_eq!(desert.metadata.characters, "Armored warrior (योद्धा)");
    assert_eq!(desert.metadata.fx_palette, "Sandstorm particulate (वाळूवादळ)");
}

#[test]
fn heavy_fx_escalates_render_and_export() {
    let baseline = generate_pipeline_plan("");
    let baseline_samples = baseline.render.sample_count().expect("baseline samples");

    for prompt in ["sandstorm", "a firestorm engulfs the city", "वाळूचे वादळ"] {
        let plan = generate_pipeline_plan(prompt);
        let samples = plan.render.sample_count().expect("samples");
        assert!(samples >= baseline_samples, "{prompt}: {samples} < {baseline_samples}");
        assert!(samples > baseline_samples, "{prompt} should escalate samples");
        for deliverable in &baseline.export.deliverables {
            assert!(
                plan.export.deliverables.contains(deliverable),
                "{prompt} dropped deliverable {deliverable}"
            );
        }
        assert!(plan.export.deliverables.len() > baseline.export.deliverables.len());
    }
}

#[test]
fn cue_phrases_in_either_language_agree() {
    let english = generate_pipeline_plan("temple at dawn with fire");
    let marathi = generate_pipeline_plan("पहाटे मंदिरात आग");
    assert_eq!(english.metadata.location, marathi.metadata.location);
    assert_eq!(english.metadata.fx_palette, marathi.metadata.fx_palette);
    assert_eq!(english.metadata.time_of_day, marathi.metadata.time_of_day);
}

#[test]
fn cues_do_not_fire_inside_other_words() {
    let plan = generate_pipeline_plan("a thousand paper lanterns, nothing else");
    let catalog = VocabularyCatalog::builtin();
    assert_eq!(plan.metadata.location, catalog.location.fallback.label);
    assert_eq!(plan.metadata.fx_palette, catalog.fx_palette.fallback.label);
}

#[test]
fn short_cues_do_not_fire_on_longer_everyday_words() {
    let catalog = VocabularyCatalog::builtin();
    let baseline = generate_pipeline_plan("");
    for prompt in [
        "राजाचे आगमन",
        "पूर्वेकडे सूर्य",
        "floodlights on the stadium",
        "a mistake at the office",
        "a spelling bee in a hazelnut grove",
    ] {
        let plan = generate_pipeline_plan(prompt);
        assert_eq!(
            plan.metadata.fx_palette, catalog.fx_palette.fallback.label,
            "{prompt} picked up an fx cue"
        );
        assert_eq!(plan.render.samples, baseline.render.samples, "{prompt}");
    }

    let monkey = generate_pipeline_plan("a monkey in the jungle");
    assert_eq!(monkey.metadata.characters, catalog.characters.fallback.label);
    let copper = generate_pipeline_plan("a copper mechanism on the bench");
    assert_eq!(copper.metadata.characters, catalog.characters.fallback.label);
    let epicenter = generate_pipeline_plan("the epicenter of the quake");
    assert_eq!(epicenter.metadata.mood, catalog.mood.fallback.label);
}

#[test]
fn whole_word_cues_still_fire_on_their_own() {
    assert_eq!(
        generate_pipeline_plan("राजाचे आगमन, मागे आग").metadata.fx_palette,
        "Fire & embers (अग्नी)"
    );
    assert_eq!(
        generate_pipeline_plan("the river floods the street").metadata.fx_palette,
        "Fluid water sim (जलप्रवाह)"
    );
    assert_eq!(
        generate_pipeline_plan("morning mist over the lake").metadata.fx_palette,
        "Volumetric smoke & fog (धूर)"
    );
    assert_eq!(
        generate_pipeline_plan("two monks chanting").metadata.characters,
        VocabularyCatalog::builtin().characters.rules[0].value.label
    );
}

#[test]
fn steps_are_distinct_within_each_stage() {
    for input in awkward_inputs() {
        for stage in generate_pipeline_plan(&input).stages {
            let unique = stage.steps.iter().collect::<HashSet<_>>();
            assert_eq!(unique.len(), stage.steps.len(), "duplicate step in {}", stage.id);
        }
    }
}

#[test]
fn case_and_spacing_do_not_change_the_plan() {
    assert_eq!(
        generate_pipeline_plan("DESERT   battlefield at\tDUSK"),
        generate_pipeline_plan("desert battlefield at dusk")
    );
}

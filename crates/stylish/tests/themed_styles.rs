//! End-to-end tests for theme configuration, mode switching and memoized styles.

use std::cell::Cell;
use std::rc::Rc;

use stylish::{
    configure_theme, ColorDef, ColorScheme, ConfigError, ConsoleEngine, ManualScheme,
    MemoryStorage, NamedStyles, StyleDeclaration, StyleTable, ThemeConfig, ThemeMode,
    ThemeRegistry, ThemeUpdate,
};

// ============================================================================
// Test fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct BoxStyle {
    background_color: String,
}

fn box_config() -> ThemeConfig<String, String> {
    ThemeConfig::dual(
        StyleTable::new().add("bg", "#fff"),
        StyleTable::new().add("bg", "#000"),
        StyleTable::new().add("brand", "blue"),
    )
    .initial_mode(ThemeMode::Light)
}

fn registry_with_os(
    config: ThemeConfig<String, String>,
    os: &ManualScheme,
) -> ThemeRegistry<String, String> {
    ThemeRegistry::builder(config)
        .storage(MemoryStorage::new())
        .scheme_source(os.clone())
        .build()
        .unwrap()
}

fn background(theme: &stylish::Theme<String, String>) -> BoxStyle {
    BoxStyle {
        background_color: theme.theme_styles.get("bg").cloned().unwrap_or_default(),
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_light_mode_box_uses_light_table() {
    let registry = registry_with_os(box_config(), &ManualScheme::new(None));
    let use_styles =
        registry.create_themed_styles(|theme, _: &()| NamedStyles::new().add("box", background(theme)));

    let themed = use_styles.use_default_styles();
    assert_eq!(themed.styles["box"].background_color, "#fff");
}

#[test]
fn test_switching_to_dark_rereads_dark_table() {
    let registry = registry_with_os(box_config(), &ManualScheme::new(None));
    let use_styles =
        registry.create_themed_styles(|theme, _: &()| NamedStyles::new().add("box", background(theme)));

    use_styles.use_default_styles();
    registry.theme_control().set_mode(ThemeMode::Dark);

    let themed = use_styles.use_default_styles();
    assert_eq!(themed.styles["box"].background_color, "#000");
}

#[test]
fn test_system_mode_follows_os_dark() {
    let os = ManualScheme::new(Some(ColorScheme::Dark));
    let registry = registry_with_os(box_config(), &os);

    registry.theme_control().set_mode(ThemeMode::System);

    let theme = registry.active_theme();
    assert_eq!(theme.theme_styles.get("bg").map(String::as_str), Some("#000"));

    os.set(Some(ColorScheme::Light));
    let theme = registry.active_theme();
    assert_eq!(theme.theme_styles.get("bg").map(String::as_str), Some("#fff"));
}

#[test]
fn test_os_scheme_flip_recomputes_styles_in_system_mode() {
    let os = ManualScheme::new(Some(ColorScheme::Light));
    let registry = registry_with_os(box_config().initial_mode(ThemeMode::System), &os);
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let use_styles = registry.create_themed_styles(move |theme, _: &()| {
        counter.set(counter.get() + 1);
        NamedStyles::new().add("box", background(theme))
    });

    let light = use_styles.use_default_styles();
    assert_eq!(light.styles["box"].background_color, "#fff");

    os.set(Some(ColorScheme::Dark));
    let dark = use_styles.use_default_styles();

    assert_eq!(dark.styles["box"].background_color, "#000");
    assert!(!Rc::ptr_eq(&light.styles, &dark.styles));
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_single_theme_mode_table_stays_empty() {
    let os = ManualScheme::new(Some(ColorScheme::Dark));
    let registry = registry_with_os(
        ThemeConfig::single(StyleTable::new().add("brand", "blue")),
        &os,
    );
    let control = registry.theme_control();

    for mode in ThemeMode::ALL {
        control.set_mode(mode);
        let theme = registry.active_theme();
        assert!(theme.theme_styles.is_empty(), "mode {mode}");
        assert_eq!(
            theme.static_styles.get("brand").map(String::as_str),
            Some("blue")
        );
    }
}

#[test]
fn test_single_theme_mode_changes_keep_cached_styles() {
    let registry = registry_with_os(
        ThemeConfig::single(StyleTable::new().add("brand", "blue")),
        &ManualScheme::new(None),
    );
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let use_styles = registry.create_themed_styles(move |theme, _: &()| {
        counter.set(counter.get() + 1);
        NamedStyles::new().add(
            "brand",
            theme.static_styles.get("brand").cloned().unwrap_or_default(),
        )
    });

    let first = use_styles.use_default_styles();
    registry.set_mode(ThemeMode::Dark);
    let second = use_styles.use_default_styles();

    assert!(Rc::ptr_eq(&first.styles, &second.styles));
    assert_eq!(calls.get(), 1);
}

// ============================================================================
// Memoization
// ============================================================================

#[test]
fn test_repeated_reads_are_identical() {
    let registry = registry_with_os(box_config(), &ManualScheme::new(None));
    let use_styles =
        registry.create_themed_styles(|theme, _: &()| NamedStyles::new().add("box", background(theme)));

    let a = use_styles.use_default_styles();
    let b = use_styles.use_default_styles();
    assert!(Rc::ptr_eq(&a.styles, &b.styles));
}

#[test]
fn test_update_theme_config_invalidates_every_factory() {
    let registry = registry_with_os(box_config(), &ManualScheme::new(None));
    let boxes =
        registry.create_themed_styles(|theme, _: &()| NamedStyles::new().add("box", background(theme)));
    let brands = registry.create_themed_styles(|theme, _: &()| {
        NamedStyles::new().add(
            "brand",
            theme.static_styles.get("brand").cloned().unwrap_or_default(),
        )
    });

    let old_box = boxes.use_default_styles();
    let old_brand = brands.use_default_styles();

    registry.update_theme_config(
        ThemeUpdate::new()
            .light(StyleTable::new().add("bg", "#f5f5f5"))
            .static_styles(StyleTable::new().add("brand", "teal")),
    );

    let new_box = boxes.use_default_styles();
    let new_brand = brands.use_default_styles();
    assert!(!Rc::ptr_eq(&old_box.styles, &new_box.styles));
    assert!(!Rc::ptr_eq(&old_brand.styles, &new_brand.styles));
    assert_eq!(new_box.styles["box"].background_color, "#f5f5f5");
    assert_eq!(new_brand.styles["brand"], "teal");
}

#[test]
fn test_dynamic_styles_recompute_on_every_call() {
    let registry = registry_with_os(box_config(), &ManualScheme::new(None));
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let use_styles = registry.create_themed_styles(move |theme, padding: &u8| {
        counter.set(counter.get() + 1);
        NamedStyles::new()
            .add("box", background(theme).background_color)
            .add("padding", padding.to_string())
    });

    let themed = use_styles.use_styles(4);
    assert_eq!(calls.get(), 1);

    for _ in 0..3 {
        let dynamic = themed.get_dynamic_styles(&8);
        assert_eq!(dynamic["padding"], "8");
    }
    assert_eq!(calls.get(), 4);
    assert_eq!(themed.styles["padding"], "4");
}

#[test]
fn test_old_snapshot_keeps_its_theme() {
    let registry = registry_with_os(box_config(), &ManualScheme::new(None));
    let use_styles =
        registry.create_themed_styles(|theme, _: &()| NamedStyles::new().add("box", background(theme)));

    let light = use_styles.use_default_styles();
    registry.set_mode(ThemeMode::Dark);

    assert_eq!(light.styles["box"].background_color, "#fff");
    assert_eq!(
        light.get_dynamic_styles(&())["box"].background_color,
        "#fff"
    );
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, PartialEq)]
struct MissingToken(&'static str);

#[test]
fn test_generator_error_is_returned_unchanged() {
    let registry = registry_with_os(box_config(), &ManualScheme::new(None));
    let use_styles = registry.try_create_themed_styles(|theme, _: &()| {
        match theme.theme_styles.get("fg") {
            Some(fg) => Ok(NamedStyles::new().add("text", fg.clone())),
            None => Err(MissingToken("fg")),
        }
    });

    assert_eq!(
        use_styles.try_use_default_styles().unwrap_err(),
        MissingToken("fg")
    );
    // Nothing was cached, so a second read fails the same way.
    assert_eq!(
        use_styles.try_use_default_styles().unwrap_err(),
        MissingToken("fg")
    );
}

#[test]
#[should_panic(expected = "generator exploded")]
fn test_generator_panic_propagates() {
    let registry = registry_with_os(box_config(), &ManualScheme::new(None));
    let use_styles = registry.create_themed_styles(|_, _: &()| -> NamedStyles<String> {
        panic!("generator exploded")
    });
    use_styles.use_default_styles();
}

#[test]
fn test_one_sided_configs_are_rejected() {
    let light_only = ThemeConfig::<String, String>::single(StyleTable::new())
        .light(StyleTable::new().add("bg", "#fff"));
    let err = configure_theme(light_only).unwrap_err();
    assert!(matches!(err, ConfigError::MissingDarkStyles));
    assert!(err.to_string().contains("dark"));

    let dark_only = ThemeConfig::<String, String>::single(StyleTable::new())
        .dark(StyleTable::new().add("bg", "#000"));
    assert!(matches!(
        configure_theme(dark_only),
        Err(ConfigError::MissingLightStyles)
    ));
}

// ============================================================================
// Engines
// ============================================================================

#[test]
fn test_console_engine_follows_mode() {
    let registry = ThemeRegistry::builder(
        ThemeConfig::<ColorDef, ColorDef>::dual(
            StyleTable::new().add("accent", ColorDef::parse_string("blue").unwrap()),
            StyleTable::new().add("accent", ColorDef::parse_string("yellow").unwrap()),
            StyleTable::new(),
        )
        .initial_mode(ThemeMode::Light),
    )
    .storage(MemoryStorage::new())
    .scheme_source(ManualScheme::new(None))
    .build()
    .unwrap();

    let use_styles = registry.create_themed_styles_with(
        ConsoleEngine::new().force_styling(true),
        |theme, _: &()| {
            let mut accent = StyleDeclaration::new();
            accent.fg = theme.theme_styles.get("accent").cloned();
            NamedStyles::new().add("accent", accent)
        },
    );

    let light = use_styles.use_default_styles();
    assert!(light.styles.paint("accent", "x").contains("\x1b[34m"));

    registry.set_mode(ThemeMode::Dark);
    let dark = use_styles.use_default_styles();
    assert!(dark.styles.paint("accent", "x").contains("\x1b[33m"));
}

#[test]
fn test_closure_engine() {
    let registry = registry_with_os(box_config(), &ManualScheme::new(None));
    let use_styles = registry.create_themed_styles_with(
        |styles: NamedStyles<String>| styles.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>(),
        |theme, _: &()| {
            NamedStyles::new().add("bg", theme.theme_styles.get("bg").cloned().unwrap_or_default())
        },
    );

    assert_eq!(*use_styles.use_default_styles().styles, vec!["bg=#fff".to_string()]);
}

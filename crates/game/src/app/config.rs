use engine::{rgb, AssetKey, Color, Point};

pub(crate) const WINDOW_TITLE: &str = "CodeFrontier - Learn Programming";
pub(crate) const SCREEN_WIDTH: i32 = 1280;
pub(crate) const SCREEN_HEIGHT: i32 = 720;
pub(crate) const LESSON_RESOLUTION: (u32, u32) = (1280, 800);
pub(crate) const TARGET_FPS: u32 = 60;

pub(crate) const PLAYER_START_HEALTH: u32 = 5;
pub(crate) const PLAYER_MAX_HEALTH: u32 = 5;

pub(crate) mod palette {
    use engine::{rgb, Color};

    pub(crate) const WHITE: Color = rgb(255, 255, 255);
    pub(crate) const SPACE_DARK: Color = rgb(15, 10, 30);
    pub(crate) const BROWN_DARK: Color = rgb(60, 40, 30);
    pub(crate) const BROWN_LIGHT: Color = rgb(120, 80, 60);
    pub(crate) const WOOD: Color = rgb(139, 90, 43);
    pub(crate) const GOLD: Color = rgb(255, 215, 0);
    pub(crate) const GREEN: Color = rgb(50, 205, 50);
    pub(crate) const RED: Color = rgb(220, 20, 60);
    pub(crate) const BLUE: Color = rgb(65, 105, 225);
    pub(crate) const ORANGE: Color = rgb(255, 140, 0);
    pub(crate) const CYAN: Color = rgb(0, 255, 255);
    pub(crate) const CODE_BG: Color = rgb(30, 30, 30);
    pub(crate) const CODE_GREEN: Color = rgb(78, 201, 176);
    pub(crate) const CODE_BLUE: Color = rgb(86, 156, 214);
    pub(crate) const CODE_PURPLE: Color = rgb(197, 134, 192);
    pub(crate) const TEXT_LIGHT: Color = rgb(240, 240, 240);
    pub(crate) const TEXT_DARK: Color = rgb(40, 40, 40);
}

pub(crate) const HEART_FULL: AssetKey = AssetKey::from_static("heart_full");
pub(crate) const HEART_EMPTY: AssetKey = AssetKey::from_static("heart_empty");
pub(crate) const PLAYER_SPRITE: AssetKey = AssetKey::from_static("player");
pub(crate) const PORTAL_SPRITE: AssetKey = AssetKey::from_static("portal");
pub(crate) const ASSISTANT_SPRITE: AssetKey = AssetKey::from_static("assistant");
pub(crate) const VILLAGE_BACKGROUND: AssetKey = AssetKey::from_static("village_bg");
pub(crate) const SPACE_BACKGROUND: AssetKey = AssetKey::from_static("space_bg");

const LESSON_PYTHON: AssetKey = AssetKey::from_static("lesson");
const LESSON_CSHARP: AssetKey = AssetKey::from_static("lesson_csharp");
const LESSON_DEFAULT: AssetKey = AssetKey::from_static("lesson_default");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum ModuleId {
    #[default]
    CSharp,
    Python,
    Php,
    JavaScript,
}

#[derive(Debug)]
pub(crate) struct ModuleInfo {
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) color: Color,
    pub(crate) lessons: [&'static str; 4],
}

const CSHARP: ModuleInfo = ModuleInfo {
    name: "Harvesting with C#",
    description: "Learn the basics of C# while harvesting fruit in the orchard!",
    color: rgb(100, 200, 100),
    lessons: ["Variables", "Functions", "Classes", "Loops"],
};
const PYTHON: ModuleInfo = ModuleInfo {
    name: "Magic Loops with Python",
    description: "Master loops and magic with Python!",
    color: rgb(180, 100, 200),
    lessons: ["For Loops", "While Loops", "List Comprehension", "Functions"],
};
const PHP: ModuleInfo = ModuleInfo {
    name: "Arcane Challenges with PHP",
    description: "Face arcane challenges using PHP!",
    color: rgb(200, 180, 80),
    lessons: ["Arrays", "Strings", "Functions", "OOP"],
};
const JAVASCRIPT: ModuleInfo = ModuleInfo {
    name: "Upgrading Resources with JavaScript",
    description: "Sharpen your skills with JavaScript!",
    color: rgb(220, 140, 80),
    lessons: ["DOM", "Events", "Promises", "Fetch API"],
};

impl ModuleId {
    pub(crate) const ALL: [ModuleId; 4] = [
        ModuleId::CSharp,
        ModuleId::Python,
        ModuleId::Php,
        ModuleId::JavaScript,
    ];

    pub(crate) fn id(self) -> &'static str {
        match self {
            ModuleId::CSharp => "csharp",
            ModuleId::Python => "python",
            ModuleId::Php => "php",
            ModuleId::JavaScript => "javascript",
        }
    }

    #[cfg(test)]
    pub(crate) fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|module| module.id() == id)
    }

    #[cfg(test)]
    pub(crate) fn from_id_or_default(id: &str) -> Self {
        Self::parse(id).unwrap_or_default()
    }

    pub(crate) fn info(self) -> &'static ModuleInfo {
        match self {
            ModuleId::CSharp => &CSHARP,
            ModuleId::Python => &PYTHON,
            ModuleId::Php => &PHP,
            ModuleId::JavaScript => &JAVASCRIPT,
        }
    }

    pub(crate) fn icon_key(self) -> AssetKey {
        match self {
            ModuleId::CSharp => AssetKey::from_static("csharp_icon"),
            ModuleId::Python => AssetKey::from_static("python_icon"),
            ModuleId::Php => AssetKey::from_static("php_icon"),
            ModuleId::JavaScript => AssetKey::from_static("javascript_icon"),
        }
    }

    pub(crate) fn opens_lesson(self) -> bool {
        matches!(self, ModuleId::Python | ModuleId::CSharp)
    }
}

pub(crate) fn lesson_image_key(module: Option<ModuleId>) -> AssetKey {
    match module {
        Some(ModuleId::Python) => LESSON_PYTHON,
        Some(ModuleId::CSharp) => LESSON_CSHARP,
        _ => LESSON_DEFAULT,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum AreaId {
    Training,
    Potions,
    Arena,
    Greenhouse,
}

#[derive(Debug)]
pub(crate) struct AreaInfo {
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) position: Point,
}

impl AreaId {
    pub(crate) const ALL: [AreaId; 4] = [
        AreaId::Training,
        AreaId::Potions,
        AreaId::Arena,
        AreaId::Greenhouse,
    ];

    pub(crate) fn info(self) -> &'static AreaInfo {
        const TRAINING: AreaInfo = AreaInfo {
            name: "Training",
            description: "Practice your programming skills",
            position: Point::new(280, 200),
        };
        const POTIONS: AreaInfo = AreaInfo {
            name: "Potions",
            description: "Brew magical code solutions",
            position: Point::new(1000, 200),
        };
        const ARENA: AreaInfo = AreaInfo {
            name: "Arena",
            description: "Challenge other programmers",
            position: Point::new(280, 520),
        };
        const GREENHOUSE: AreaInfo = AreaInfo {
            name: "Greenhouse",
            description: "Grow your projects",
            position: Point::new(1000, 520),
        };
        match self {
            AreaId::Training => &TRAINING,
            AreaId::Potions => &POTIONS,
            AreaId::Arena => &ARENA,
            AreaId::Greenhouse => &GREENHOUSE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_ids_parse_case_sensitively() {
        assert_eq!(ModuleId::parse("python"), Some(ModuleId::Python));
        assert_eq!(ModuleId::parse("Python"), None);
        assert_eq!(ModuleId::from_id_or_default("rust"), ModuleId::CSharp);
        for module in ModuleId::ALL {
            assert_eq!(ModuleId::parse(module.id()), Some(module));
        }
    }

    #[test]
    fn only_python_and_csharp_open_lessons() {
        let lesson_modules: Vec<_> = ModuleId::ALL
            .into_iter()
            .filter(|module| module.opens_lesson())
            .collect();
        assert_eq!(lesson_modules, vec![ModuleId::CSharp, ModuleId::Python]);
    }

    #[test]
    fn lesson_image_mapping_has_default() {
        assert_eq!(lesson_image_key(Some(ModuleId::Python)).as_str(), "lesson");
        assert_eq!(
            lesson_image_key(Some(ModuleId::CSharp)).as_str(),
            "lesson_csharp"
        );
        assert_eq!(
            lesson_image_key(Some(ModuleId::Php)).as_str(),
            "lesson_default"
        );
        assert_eq!(lesson_image_key(None).as_str(), "lesson_default");
    }

    #[test]
    fn icon_keys_follow_module_ids() {
        for module in ModuleId::ALL {
            assert_eq!(module.icon_key().as_str(), format!("{}_icon", module.id()));
        }
    }
}

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    #[serde(rename = "Langage")]
    Langage,
    #[serde(rename = "Mémoire de Travail")]
    MemoireDeTravail,
    #[serde(rename = "Mise à jour")]
    MiseAJour,
    #[serde(rename = "Inhibition")]
    Inhibition,
    #[serde(rename = "Autre")]
    Autre,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Langage,
        Category::MemoireDeTravail,
        Category::MiseAJour,
        Category::Inhibition,
        Category::Autre,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Langage => "Langage",
            Category::MemoireDeTravail => "Mémoire de Travail",
            Category::MiseAJour => "Mise à jour",
            Category::Inhibition => "Inhibition",
            Category::Autre => "Autre",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Category::Langage => (0x37, 0x98, 0xda),
            Category::MemoireDeTravail => (0xec, 0xa1, 0x13),
            Category::MiseAJour => (0xe3, 0x65, 0xd6),
            Category::Inhibition => (0x83, 0x53, 0xda),
            Category::Autre => (0x80, 0x80, 0x80),
        }
    }

    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("{r:02X}{g:02X}{b:02X}")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TaskDef {
    pub name: &'static str,
    pub category: Category,
    /// Chart label, lines separated by `\n`.
    pub short_label: &'static str,
}

/// One section of the data-entry form, listing tasks side by side in pairs.
#[derive(Debug, Clone, Copy)]
pub struct EntryGroup {
    pub title: &'static str,
    pub pairs: &'static [(&'static str, &'static str)],
}

pub const DISCRIMINATION_PHONOLOGIQUE: &str = "Discrimination Phonologique";
pub const DECISION_LEXICALE_AUDITIVE: &str = "Décision Lexicale Auditive";
pub const MOTS_OUTILS: &str = "Mots Outils";
pub const STOCK_LEXICAL: &str = "Stock Lexical";
pub const COMPREHENSION_SYNTAXIQUE: &str = "Compréhension Syntaxique";
pub const MOTS_OUTILS_BOEHM: &str = "Mots Outils - BOEHM";

pub const MDT_V_ENDROIT_EMPAN: &str = "Mémoire de travail verbale endroit empan";
pub const MDT_V_ENDROIT_BRUT: &str = "Mémoire de travail verbale endroit brut";
pub const MDT_V_ENVERS_EMPAN: &str = "Mémoire de travail verbale envers empan";
pub const MDT_V_ENVERS_BRUT: &str = "Mémoire de travail verbale envers brut";
pub const MDT_NV_ENDROIT_EMPAN: &str = "Mémoire de travail non verbale endroit empan";
pub const MDT_NV_ENDROIT_BRUT: &str = "Mémoire de travail non verbale endroit brut";
pub const MDT_NV_ENVERS_EMPAN: &str = "Mémoire de travail non verbale envers empan";
pub const MDT_NV_ENVERS_BRUT: &str = "Mémoire de travail non verbale envers brut";

pub const MAJ_V_EMPAN: &str = "Mise à jour verbale empan";
pub const MAJ_V_SCORE: &str = "Mise à jour verbale score";
pub const MAJ_NV_EMPAN: &str = "Mise à jour non verbale empan";
pub const MAJ_NV_SCORE: &str = "Mise à jour non verbale score";

pub const INHIB_V_CONG_SCORE: &str = "Inhibition verbale congruent score";
pub const INHIB_V_INCONG_SCORE: &str = "Inhibition verbale incongruent score";
pub const INHIB_V_CONG_TEMPS: &str = "Inhibition verbale congruent temps";
pub const INHIB_V_INCONG_TEMPS: &str = "Inhibition verbale incongruent temps";
pub const INHIB_NV_CONG_SCORE: &str = "Inhibition non verbale congruent score";
pub const INHIB_NV_INCONG_SCORE: &str = "Inhibition non verbale incongruent score";
pub const INHIB_NV_CONG_TEMPS: &str = "Inhibition non verbale congruent temps";
pub const INHIB_NV_INCONG_TEMPS: &str = "Inhibition non verbale incongruent temps";

pub const INHIB_V_INTERF_SCORE: &str = "Inhibition verbale interférence score";
pub const INHIB_V_INTERF_TEMPS: &str = "Inhibition verbale interférence temps";
pub const INHIB_NV_INTERF_SCORE: &str = "Inhibition non verbale interférence score";
pub const INHIB_NV_INTERF_TEMPS: &str = "Inhibition non verbale interférence temps";

const LANGAGE_PAIRS: &[(&str, &str)] = &[
    (DISCRIMINATION_PHONOLOGIQUE, DECISION_LEXICALE_AUDITIVE),
    (MOTS_OUTILS, STOCK_LEXICAL),
    (COMPREHENSION_SYNTAXIQUE, MOTS_OUTILS_BOEHM),
];
const MDT_VERBALE_PAIRS: &[(&str, &str)] = &[
    (MDT_V_ENDROIT_EMPAN, MDT_V_ENDROIT_BRUT),
    (MDT_V_ENVERS_EMPAN, MDT_V_ENVERS_BRUT),
];
const MDT_NON_VERBALE_PAIRS: &[(&str, &str)] = &[
    (MDT_NV_ENDROIT_EMPAN, MDT_NV_ENDROIT_BRUT),
    (MDT_NV_ENVERS_EMPAN, MDT_NV_ENVERS_BRUT),
];
const MAJ_VERBALE_PAIRS: &[(&str, &str)] = &[(MAJ_V_EMPAN, MAJ_V_SCORE)];
const MAJ_NON_VERBALE_PAIRS: &[(&str, &str)] = &[(MAJ_NV_EMPAN, MAJ_NV_SCORE)];
const INHIB_VERBALE_PAIRS: &[(&str, &str)] = &[
    (INHIB_V_CONG_SCORE, INHIB_V_INCONG_SCORE),
    (INHIB_V_CONG_TEMPS, INHIB_V_INCONG_TEMPS),
];
const INHIB_NON_VERBALE_PAIRS: &[(&str, &str)] = &[
    (INHIB_NV_CONG_SCORE, INHIB_NV_INCONG_SCORE),
    (INHIB_NV_CONG_TEMPS, INHIB_NV_INCONG_TEMPS),
];

const ENTRY_GROUPS: &[EntryGroup] = &[
    EntryGroup {
        title: "Langage",
        pairs: LANGAGE_PAIRS,
    },
    EntryGroup {
        title: "Mémoire de Travail Verbale",
        pairs: MDT_VERBALE_PAIRS,
    },
    EntryGroup {
        title: "Mémoire de Travail Non Verbale",
        pairs: MDT_NON_VERBALE_PAIRS,
    },
    EntryGroup {
        title: "Mise à jour Verbale",
        pairs: MAJ_VERBALE_PAIRS,
    },
    EntryGroup {
        title: "Mise à jour Non Verbale",
        pairs: MAJ_NON_VERBALE_PAIRS,
    },
    EntryGroup {
        title: "INHIB verbale",
        pairs: INHIB_VERBALE_PAIRS,
    },
    EntryGroup {
        title: "INHIB non verbale",
        pairs: INHIB_NON_VERBALE_PAIRS,
    },
];

const fn task(name: &'static str, category: Category, short_label: &'static str) -> TaskDef {
    TaskDef {
        name,
        category,
        short_label,
    }
}

const BUILTIN_TASKS: &[TaskDef] = &[
    task(
        DISCRIMINATION_PHONOLOGIQUE,
        Category::Langage,
        "Discrimination\nPhonologique",
    ),
    task(
        DECISION_LEXICALE_AUDITIVE,
        Category::Langage,
        "Décision\nLexicale\nAuditive",
    ),
    task(MOTS_OUTILS, Category::Langage, "Mots\nOutils"),
    task(STOCK_LEXICAL, Category::Langage, "Stock\nLexical"),
    task(
        COMPREHENSION_SYNTAXIQUE,
        Category::Langage,
        "Compréhension\nSyntaxique",
    ),
    task(MOTS_OUTILS_BOEHM, Category::Langage, "BOEHM"),
    task(
        MDT_V_ENDROIT_EMPAN,
        Category::MemoireDeTravail,
        "Mémoire de travail\nVerbale\nendroit\nempan",
    ),
    task(
        MDT_V_ENDROIT_BRUT,
        Category::MemoireDeTravail,
        "Mémoire de travail\nVerbale\nendroit\nbrut",
    ),
    task(
        MDT_V_ENVERS_EMPAN,
        Category::MemoireDeTravail,
        "Mémoire de travail\nVerbale\nenvers\nempan",
    ),
    task(
        MDT_V_ENVERS_BRUT,
        Category::MemoireDeTravail,
        "Mémoire de travail\nVerbale\nenvers\nbrut",
    ),
    task(
        MDT_NV_ENDROIT_EMPAN,
        Category::MemoireDeTravail,
        "Mémoire de travail\nNon Verbale\nendroit\nempan",
    ),
    task(
        MDT_NV_ENDROIT_BRUT,
        Category::MemoireDeTravail,
        "Mémoire de travail\nNon Verbale\nendroit\nbrut",
    ),
    task(
        MDT_NV_ENVERS_EMPAN,
        Category::MemoireDeTravail,
        "Mémoire de travail\nNon Verbale\nenvers\nempan",
    ),
    task(
        MDT_NV_ENVERS_BRUT,
        Category::MemoireDeTravail,
        "Mémoire de travail\nNon Verbale\nenvers\nbrut",
    ),
    task(MAJ_V_EMPAN, Category::MiseAJour, "Mise-à-jour\nVerbale\nempan"),
    task(MAJ_V_SCORE, Category::MiseAJour, "Mise-à-jour\nVerbale\nbrut"),
    task(
        MAJ_NV_EMPAN,
        Category::MiseAJour,
        "Mise-à-jour\nNon Verbale\nempan",
    ),
    task(
        MAJ_NV_SCORE,
        Category::MiseAJour,
        "Mise-à-jour\nNon Verbale\nbrut",
    ),
    task(
        INHIB_V_CONG_SCORE,
        Category::Inhibition,
        "Inhibition\nVerbale\nCongruent\nscore",
    ),
    task(
        INHIB_V_INCONG_SCORE,
        Category::Inhibition,
        "Inhibition\nVerbale\nIncongruent\nscore",
    ),
    task(
        INHIB_V_CONG_TEMPS,
        Category::Inhibition,
        "Inhibition\nVerbale\nCongruent\ntemps",
    ),
    task(
        INHIB_V_INCONG_TEMPS,
        Category::Inhibition,
        "Inhibition\nVerbale\nIncongruent\ntemps",
    ),
    task(
        INHIB_V_INTERF_SCORE,
        Category::Inhibition,
        "Inhibition\nVerbale\nscore",
    ),
    task(
        INHIB_V_INTERF_TEMPS,
        Category::Inhibition,
        "Inhibition\nVerbale\ntemps",
    ),
    task(
        INHIB_NV_CONG_SCORE,
        Category::Inhibition,
        "Inhibition\nNon Verbale\nCongruent\nscore",
    ),
    task(
        INHIB_NV_INCONG_SCORE,
        Category::Inhibition,
        "Inhibition\nNon Verbale\nIncongruent\nscore",
    ),
    task(
        INHIB_NV_CONG_TEMPS,
        Category::Inhibition,
        "Inhibition\nNon Verbale\nCongruent\ntemps",
    ),
    task(
        INHIB_NV_INCONG_TEMPS,
        Category::Inhibition,
        "Inhibition\nNon Verbale\nIncongruent\ntemps",
    ),
    task(
        INHIB_NV_INTERF_SCORE,
        Category::Inhibition,
        "Inhibition\nNon Verbale\nscore",
    ),
    task(
        INHIB_NV_INTERF_TEMPS,
        Category::Inhibition,
        "Inhibition\nNon Verbale\ntemps",
    ),
];

pub fn builtin_tasks() -> &'static [TaskDef] {
    BUILTIN_TASKS
}

pub fn entry_groups() -> &'static [EntryGroup] {
    ENTRY_GROUPS
}

/// Entered tasks in form order, without the derived interference tasks.
pub fn entry_tasks() -> impl Iterator<Item = &'static str> {
    ENTRY_GROUPS
        .iter()
        .flat_map(|g| g.pairs.iter())
        .flat_map(|&(a, b)| [a, b])
}

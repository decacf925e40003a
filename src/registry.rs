//! Bidirectional code ↔ label table for every coded form field.
//!
//! The evaluation API speaks in option codes (`Ikkilamchi_bozor`), the stored
//! asset details speak in Russian display labels (`Вторичный рынок`), and
//! older assets may carry legacy codes (`Ikkinchi bozor`). Form generation,
//! detail-map construction and update pre-population all go through this one
//! table.

/// One selectable option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub code: &'static str,
    pub label: &'static str,
}

/// A coded form field.
#[derive(Debug)]
pub struct Field {
    /// Form / API field name.
    pub name: &'static str,
    /// Key under which the value is stored in the asset detail map.
    pub detail_key: &'static str,
    pub choices: &'static [Choice],
    /// Legacy value → current code.
    pub aliases: &'static [(&'static str, &'static str)],
    /// Checkbox group rather than a single select.
    pub multiple: bool,
    /// Codes checked by default (checkbox groups) or preselected (selects).
    pub defaults: &'static [&'static str],
}

const fn c(code: &'static str, label: &'static str) -> Choice {
    Choice { code, label }
}

impl Field {
    pub fn label(&self, code: &str) -> Option<&'static str> {
        self.choices.iter().find(|ch| ch.code == code).map(|ch| ch.label)
    }

    fn canonical_code(&self, value: &str) -> Option<&'static str> {
        let value = value.trim();
        self.choices
            .iter()
            .find(|ch| ch.label == value || ch.code == value)
            .map(|ch| ch.code)
            .or_else(|| {
                self.aliases
                    .iter()
                    .find(|(legacy, _)| *legacy == value)
                    .map(|(_, code)| *code)
            })
    }

    /// Display label for a code. Legacy codes are translated first; unknown
    /// values are shown as-is.
    pub fn display(&self, code: &str) -> String {
        self.canonical_code(code)
            .and_then(|c| self.label(c))
            .map(str::to_string)
            .unwrap_or_else(|| code.to_string())
    }

    /// Form code for a stored value: label → code, code → itself, legacy
    /// alias → current code, anything else unchanged.
    pub fn resolve(&self, stored: &str) -> String {
        self.canonical_code(stored)
            .map(str::to_string)
            .unwrap_or_else(|| stored.trim().to_string())
    }

    /// Labels of a checkbox group joined with `, `.
    pub fn display_list(&self, codes: &[String]) -> Option<String> {
        if codes.is_empty() {
            return None;
        }
        Some(
            codes
                .iter()
                .map(|code| self.display(code))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    /// Codes of a stored, comma-joined checkbox group.
    pub fn resolve_list(&self, stored: &str) -> Vec<String> {
        stored
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.starts_with("Не указан"))
            .map(|s| self.resolve(s))
            .collect()
    }

    pub fn default_code(&self) -> Option<&'static str> {
        self.defaults.first().copied()
    }
}

// ---------------------------------------------------------------------------
// Apartment fields
// ---------------------------------------------------------------------------

pub static BINO_TURI: Field = Field {
    name: "bino_turi",
    detail_key: "Тип здания",
    choices: &[
        c("Yangi_qurilgan_uylar", "Новостройка"),
        c("Ikkilamchi_bozor", "Вторичный рынок"),
    ],
    aliases: &[("Ikkinchi bozor", "Ikkilamchi_bozor")],
    multiple: false,
    defaults: &["Ikkilamchi_bozor"],
};

pub static QURILISH_TURI: Field = Field {
    name: "qurilish_turi",
    detail_key: "Тип строения",
    choices: &[
        c("Panelli", "Панельный"),
        c("Monolitli", "Монолитный"),
        c("G_ishtli", "Кирпичный"),
        c("Blokli", "Блочный"),
        c("Yog_ochli", "Деревянный"),
    ],
    aliases: &[
        ("Panel", "Panelli"),
        ("Monolit", "Monolitli"),
        ("G'isht", "G_ishtli"),
        ("G'ishtli", "G_ishtli"),
        ("Blok", "Blokli"),
        ("Yog'och", "Yog_ochli"),
    ],
    multiple: false,
    defaults: &["Panelli"],
};

pub static PLANIROVKA: Field = Field {
    name: "planirovka",
    detail_key: "Планировка",
    choices: &[
        c("Alohida_ajratilgan", "Раздельная"),
        c("Aralash", "Смешанная"),
        c("Aralash_alohida", "Смешанная раздельная"),
        c("Kichik_oilalar_uchun", "Для малых семей"),
        c("Ko_p_darajali", "Многоуровневая"),
        c("Pentxaus", "Пентхаус"),
        c("Studiya", "Студия"),
    ],
    aliases: &[("Studio", "Studiya")],
    multiple: false,
    defaults: &["Alohida_ajratilgan"],
};

pub static RENOVATION: Field = Field {
    name: "renovation",
    detail_key: "Ремонт",
    choices: &[
        c("Yaxshi", "Хороший"),
        c("Zo_r", "Отличный"),
        c("Qoniqarsiz", "Плохой"),
    ],
    aliases: &[],
    multiple: false,
    defaults: &["Yaxshi"],
};

pub static SANUZEL: Field = Field {
    name: "sanuzel",
    detail_key: "Санузел",
    choices: &[
        c("Alohida", "Раздельный"),
        c("Aralash", "Совмещенный"),
        c("2_va_undan_ko_p_sanuzel", "2 и более санузлов"),
    ],
    aliases: &[("Birgalikda", "Aralash")],
    multiple: false,
    defaults: &["Alohida"],
};

pub static OWNER: Field = Field {
    name: "owner",
    detail_key: "Собственность",
    choices: &[c("Xususiy", "Частная"), c("Biznes", "Бизнес")],
    aliases: &[("Mulkdor", "Xususiy")],
    multiple: false,
    defaults: &["Xususiy"],
};

pub static MEBEL: Field = Field {
    name: "mebel",
    detail_key: "Мебель",
    choices: &[c("Yo'q", "Без мебели"), c("Ha", "С мебелью")],
    aliases: &[],
    multiple: false,
    defaults: &["Yo'q"],
};

pub static KELISHSA: Field = Field {
    name: "kelishsa",
    detail_key: "Можно договориться",
    choices: &[c("Yes", "Да"), c("No", "Нет")],
    aliases: &[("Ha", "Yes"), ("Yo'q", "No")],
    multiple: false,
    defaults: &["Yes"],
};

pub static UYDA: Field = Field {
    name: "uyda",
    detail_key: "В доме",
    choices: &[
        c("Televizor", "Телевизор"),
        c("Internet", "Интернет"),
        c("Konditsioner", "Кондиционер"),
        c("Telefon", "Телефон"),
        c("Balkon", "Балкон"),
        c("Kir yuvish mashinasi", "Стиральная машина"),
        c("Sovutgich", "Холодильник"),
        c("Oshxona", "Кухня"),
        c("Kabel TV", "Кабельное ТВ"),
    ],
    aliases: &[],
    multiple: true,
    defaults: &["Internet"],
};

pub static ATROFDA: Field = Field {
    name: "atrofda",
    detail_key: "Рядом с домом",
    choices: &[
        c("Maktab", "Школа"),
        c("Park", "Парк"),
        c("Shifoxona", "Больница"),
        c("Supermarket", "Супермаркет"),
        c("Do'kon", "Магазин"),
        c("Avtoturargoh", "Парковка"),
        c("Poliklinika", "Поликлиника"),
        c("Bekat", "Остановка"),
        c("Bolalar maydonchasi", "Детская площадка"),
        c("Restoran", "Ресторан"),
        c("Kafe", "Кафе"),
        c("Ko'ngilochar maskanlar", "Развлечения"),
        c("Bog'cha", "Детский сад"),
        c("Yashil hudud", "Зеленая зона"),
    ],
    aliases: &[],
    multiple: true,
    defaults: &["Maktab", "Park"],
};

// ---------------------------------------------------------------------------
// Car fields
// ---------------------------------------------------------------------------

pub static STATE: Field = Field {
    name: "state",
    detail_key: "Регион",
    choices: &[
        c("Toshkent shahri", "г. Ташкент"),
        c("Toshkent Viloyati", "Ташкентская область"),
        c("Samarqand Viloyati", "Самаркандская область"),
        c("Buxoro Viloyati", "Бухарская область"),
        c("Andijon Viloyati", "Андижанская область"),
        c("Farg'ona Viloyati", "Ферганская область"),
        c("Namangan Viloyati", "Наманганская область"),
        c("Qashqadaryo Viloyati", "Кашкадарьинская область"),
        c("Surxondaryo Viloyati", "Сурхандарьинская область"),
        c("Jizzax Viloyati", "Джизакская область"),
        c("Sirdaryo Viloyati", "Сырдарьинская область"),
        c("Navoiy Viloyati", "Навоийская область"),
        c("Xorazm Viloyati", "Хорезмская область"),
        c("Qoraqalpogʻiston Respublikasi", "Республика Каракалпакстан"),
    ],
    aliases: &[],
    multiple: false,
    defaults: &[],
};

pub static FUEL: Field = Field {
    name: "fuel",
    detail_key: "Топливо",
    choices: &[
        c("Benzin", "Бензин"),
        c("Gaz/Benzin", "Газ/Бензин"),
        c("Dizel", "Дизель"),
        c("Gibrid", "Гибрид"),
        c("Elektro", "Электро"),
        c("Boshqa", "Другое"),
    ],
    aliases: &[],
    multiple: false,
    defaults: &[],
};

pub static TRANSMISSION: Field = Field {
    name: "transmission",
    detail_key: "Коробка передач",
    choices: &[c("Mexanik", "Механическая"), c("Avtomat", "Автоматическая")],
    aliases: &[],
    multiple: false,
    defaults: &["Mexanik"],
};

pub static BODY_TYPE: Field = Field {
    name: "body_type",
    detail_key: "Тип кузова",
    choices: &[
        c("Sedan", "Седан"),
        c("Xetchbek", "Хэтчбек"),
        c("Universal", "Универсал"),
        c("Yo'ltanlamas", "Внедорожник"),
        c("Kupe", "Купе"),
        c("Miniven", "Минивэн"),
        c("Pikap", "Пикап"),
        c("Kabriolet", "Кабриолет"),
        c("Boshqa", "Другое"),
    ],
    aliases: &[],
    multiple: false,
    defaults: &[],
};

pub static COLOR: Field = Field {
    name: "color",
    detail_key: "Цвет",
    choices: &[
        c("Oq", "Белый"),
        c("Qora", "Черный"),
        c("Kumush", "Серебристый"),
        c("Kulrang", "Серый"),
        c("Ko'k", "Синий"),
        c("Jigarrang", "Коричневый"),
        c("Bejeviy", "Бежевый"),
        c("Asfalt", "Асфальт"),
        c("Boshqa", "Другой"),
    ],
    aliases: &[],
    multiple: false,
    defaults: &["Oq"],
};

pub static CONDITION: Field = Field {
    name: "condition",
    detail_key: "Состояние",
    choices: &[
        c("A'lo", "Отличное"),
        c("Yaxshi", "Хорошее"),
        c("O'rtacha", "Среднее"),
        c("Remont talab", "Требует ремонта"),
    ],
    aliases: &[],
    multiple: false,
    defaults: &["Yaxshi"],
};

pub static OWNERSHIP: Field = Field {
    name: "ownership",
    detail_key: "Тип собственности",
    choices: &[c("Xususiy", "Частная"), c("Biznes", "Бизнес")],
    aliases: &[],
    multiple: false,
    defaults: &["Xususiy"],
};

pub static OWNERS_COUNT: Field = Field {
    name: "owners_count",
    detail_key: "Владельцев",
    choices: &[c("1", "1"), c("2", "2"), c("3", "3"), c("4", "4+")],
    aliases: &[],
    multiple: false,
    defaults: &["1"],
};

pub static FEATURES: Field = Field {
    name: "features",
    detail_key: "Опции",
    choices: &[
        c("Konditsioner", "Кондиционер"),
        c("Xavfsizlik tizimi", "Система безопасности"),
        c("Parctronik", "Парктроник"),
        c("Rastamojka qilingan", "Растаможен"),
        c("Elektron oynalar", "Электростеклоподъемники"),
        c("Elektron ko'zgular", "Электрозеркала"),
    ],
    aliases: &[],
    multiple: true,
    defaults: &[],
};

/// Coded apartment fields in form order.
pub static APARTMENT_FIELDS: &[&Field] = &[
    &BINO_TURI,
    &QURILISH_TURI,
    &PLANIROVKA,
    &RENOVATION,
    &SANUZEL,
    &OWNER,
    &MEBEL,
    &KELISHSA,
    &UYDA,
    &ATROFDA,
];

/// Coded car fields in form order.
pub static CAR_FIELDS: &[&Field] = &[
    &STATE,
    &FUEL,
    &TRANSMISSION,
    &BODY_TYPE,
    &COLOR,
    &CONDITION,
    &OWNERSHIP,
    &OWNERS_COUNT,
    &FEATURES,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_and_code_round_trip() {
        assert_eq!(BINO_TURI.display("Ikkilamchi_bozor"), "Вторичный рынок");
        assert_eq!(BINO_TURI.resolve("Вторичный рынок"), "Ikkilamchi_bozor");
        assert_eq!(BINO_TURI.resolve("Ikkilamchi_bozor"), "Ikkilamchi_bozor");
    }

    #[test]
    fn legacy_aliases_map_to_current_codes() {
        assert_eq!(BINO_TURI.resolve("Ikkinchi bozor"), "Ikkilamchi_bozor");
        assert_eq!(QURILISH_TURI.resolve("G'isht"), "G_ishtli");
        assert_eq!(SANUZEL.resolve("Birgalikda"), "Aralash");
        assert_eq!(KELISHSA.resolve("Ha"), "Yes");
        assert_eq!(QURILISH_TURI.display("Panel"), "Панельный");
    }

    #[test]
    fn unknown_values_pass_through() {
        assert_eq!(RENOVATION.resolve("Евроремонт"), "Евроремонт");
        assert_eq!(RENOVATION.display("Zo'r-zo'r"), "Zo'r-zo'r");
    }

    #[test]
    fn checkbox_groups_join_and_split() {
        let codes = vec!["Maktab".to_string(), "Bog'cha".to_string()];
        let stored = ATROFDA.display_list(&codes).unwrap();
        assert_eq!(stored, "Школа, Детский сад");
        assert_eq!(ATROFDA.resolve_list(&stored), codes);
        assert!(ATROFDA.display_list(&[]).is_none());
        assert!(UYDA.resolve_list("Не указано").is_empty());
    }

    #[test]
    fn owners_count_four_plus() {
        assert_eq!(OWNERS_COUNT.display("4"), "4+");
        assert_eq!(OWNERS_COUNT.resolve("4+"), "4");
    }

    #[test]
    fn every_choice_is_unique_within_its_field() {
        for f in APARTMENT_FIELDS.iter().chain(CAR_FIELDS.iter()) {
            for (i, a) in f.choices.iter().enumerate() {
                for b in &f.choices[i + 1..] {
                    assert_ne!(a.code, b.code, "duplicate code in {}", f.name);
                    assert_ne!(a.label, b.label, "duplicate label in {}", f.name);
                }
            }
        }
    }
}

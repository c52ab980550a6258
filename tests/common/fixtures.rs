//! Canned result sets for the built-in cases.
//!
//! [`conforming`] returns, for each built-in query, items a well-behaved
//! endpoint could return. [`violating`] returns one item that breaks the
//! query's semantics, for negative harness tests.

use super::builders::{vacancy, VacancyBuilder};
use serde_json::Value;

/// Items that satisfy the built-in case for `query`.
pub fn conforming(query: &str) -> Vec<Value> {
    match query {
        "разработчик" => vec![
            vacancy("Разработчик Rust", "Яндекс"),
            VacancyBuilder::new("Программист 1С")
                .requirement("Опыт работы разработчиком от 3 лет, знание разработчик-инструментов")
                .build(),
        ],
        "директор магазина" => vec![
            vacancy("Директор магазина", "Пятёрочка"),
            vacancy("Заместитель директора магазина", "Перекрёсток"),
            VacancyBuilder::new("Управляющий")
                .responsibility("Работа в должности директор  магазина") // two spaces
                .build(),
        ],
        "продажи" => vec![
            vacancy("Менеджер по продажам", "Эльдорадо"),
            vacancy("Специалист отдела продажи", "М.Видео"),
        ],
        "!продажи" => vec![vacancy("Руководитель отдела продажи", "ВкусВилл")],
        "Гео*" => vec![
            vacancy("Геодезист", "Геострой"),
            vacancy("Инженер-геолог", "Газпром"),
        ],
        "сторожила" => vec![
            vacancy("Сторожила", "ЧОП Щит"),
            vacancy("Охранник", "ЧОП Барс"),
        ],
        "разработчик OR кассир" => vec![
            vacancy("Кассир", "Магнит"),
            vacancy("Разработчик Python", "Тинькофф"),
        ],
        "разработчик AND кассир" => vec![VacancyBuilder::new("Разработчик кассовых решений")
            .requirement("Опыт работы кассир или программист")
            .build()],
        "разработчик NOT кассир NOT менеджер" => vec![
            vacancy("Разработчик C++", "Касперский"),
            vacancy("Старший разработчик", "Сбер"),
        ],
        "(столяр OR столяр-плотник) AND (электрик OR сантехник)" => vec![
            vacancy("Столяр-сантехник", "УК Дом"),
            vacancy("Столяр, электрик", "ЖЭК 5"),
        ],
        "NAME:(python OR java) and COMPANY_NAME:HeadHunter" => vec![
            vacancy("Python-разработчик", "HeadHunter"),
            vacancy("Java Developer", "HeadHunter::Analytics"),
        ],
        "запроооооооооос" => vec![],
        other => panic!("no conforming fixture for {other:?}"),
    }
}

/// One item that breaks the built-in case for `query`.
pub fn violating(query: &str) -> Value {
    match query {
        "разработчик" => vacancy("Тестировщик", "Яндекс"),
        "директор магазина" => vacancy("Директор сети магазинов", "Пятёрочка"),
        "продажи" => vacancy("Менеджер по закупкам", "Эльдорадо"),
        "!продажи" => vacancy("Руководитель отдела закупок", "ВкусВилл"),
        "Гео*" => vacancy("Инженер-строитель", "ПИК"),
        // every hit still contains the literal term, so no synonym surfaced
        "сторожила" => vacancy("Сторожила-охранник", "ЧОП Щит"),
        "разработчик OR кассир" => vacancy("Повар", "Шоколадница"),
        "разработчик AND кассир" => vacancy("Кассир", "Магнит"),
        "разработчик NOT кассир NOT менеджер" => vacancy("Разработчик, менеджер проектов", "Сбер"),
        "(столяр OR столяр-плотник) AND (электрик OR сантехник)" => vacancy("Столяр", "Мебель"),
        "NAME:(python OR java) and COMPANY_NAME:HeadHunter" => vacancy("Python developer", "Avito"),
        "запроооооооооос" => vacancy("Что угодно", "Кто угодно"),
        other => panic!("no violating fixture for {other:?}"),
    }
}

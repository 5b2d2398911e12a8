//! Classes offered on the form and the rating items each class is scored on.

/// Topics every class is rated on, after its teachers.
pub const GENERAL_RATING_ITEMS: &[&str] = &[
    "Chất lượng bữa ăn",
    "Vệ sinh lớp học",
    "Cơ sở vật chất",
    "Hoạt động ngoại khóa",
    "Thông tin liên lạc với phụ huynh",
];

/// Class name and its teachers, in display order.
pub const CLASS_TEACHERS: &[(&str, &[&str])] = &[
    ("Nhà trẻ A", &["Lan", "Hoa"]),
    ("Nhà trẻ B", &["Mai", "Hương"]),
    ("Mầm 1", &["Thu", "Ngọc"]),
    ("Mầm 2", &["Hạnh", "Yến"]),
    ("Chồi 1", &["Trang", "Thảo"]),
    ("Chồi 2", &["Linh", "Phương"]),
    ("Lá 1", &["Hằng", "Dung"]),
    ("Lá 2", &["Nga", "Vân"]),
];

pub const TEACHER_PREFIX: &str = "Cô giáo";

pub fn classes() -> impl Iterator<Item = &'static str> {
    CLASS_TEACHERS.iter().map(|(class, _)| *class)
}

pub fn teachers_of(class_name: &str) -> Option<&'static [&'static str]> {
    CLASS_TEACHERS
        .iter()
        .find(|(class, _)| *class == class_name)
        .map(|(_, teachers)| *teachers)
}

/// Rating items shown for a class: its teachers followed by the general topics.
/// Unknown classes have no items.
pub fn rating_items(class_name: &str) -> Vec<String> {
    match teachers_of(class_name) {
        Some(teachers) => teachers
            .iter()
            .map(|teacher| format!("{} {}", TEACHER_PREFIX, teacher))
            .chain(GENERAL_RATING_ITEMS.iter().map(|item| item.to_string()))
            .collect(),
        None => Vec::new(),
    }
}

/// Orders the rated items of a stored review the way the form presents them.
/// Classes missing from the catalog keep the stored order.
pub fn ordered_items<'a, I>(class_name: &str, rated: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let rated: Vec<&String> = rated.into_iter().collect();
    if teachers_of(class_name).is_none() {
        return rated.into_iter().cloned().collect();
    }
    let catalog = rating_items(class_name);
    let mut ordered: Vec<String> = catalog
        .iter()
        .filter(|item| rated.iter().any(|r| r == item))
        .cloned()
        .collect();
    // items since removed from the catalog go last
    ordered.extend(rated.into_iter().filter(|r| !catalog.contains(*r)).cloned());
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teachers_come_before_general_items() {
        let items = rating_items("Mầm 1");
        assert_eq!(items[0], "Cô giáo Thu");
        assert_eq!(items[1], "Cô giáo Ngọc");
        assert_eq!(&items[2..], GENERAL_RATING_ITEMS);
    }

    #[test]
    fn unknown_class_has_no_items() {
        assert!(rating_items("Lớp không tồn tại").is_empty());
    }

    #[test]
    fn ordered_items_skips_unrated_and_keeps_form_order() {
        let rated = vec!["Vệ sinh lớp học".to_string(), "Cô giáo Thu".to_string()];
        let ordered = ordered_items("Mầm 1", &rated);
        assert_eq!(ordered, vec!["Cô giáo Thu", "Vệ sinh lớp học"]);
    }

    #[test]
    fn ordered_items_falls_back_to_stored_order() {
        let rated = vec!["b".to_string(), "a".to_string()];
        assert_eq!(ordered_items("Old class", &rated), vec!["b", "a"]);
    }

    #[test]
    fn retired_items_are_listed_after_current_ones() {
        let rated = vec!["Cô giáo cũ".to_string(), "Cô giáo Thu".to_string()];
        assert_eq!(ordered_items("Mầm 1", &rated), vec!["Cô giáo Thu", "Cô giáo cũ"]);
    }
}

/// 作物名与当季食材名的比对键
///
/// 两侧名称分别录入，常见全形标点、全形空格与首尾空白的差异。
/// 规则：全形 ASCII（U+FF01..U+FF5E）转半形，全形空格转半形，连续空白合并为一个，去首尾空白。
pub fn normalize_name(raw: &str) -> String {
    let halfwidth: String = raw
        .chars()
        .map(|ch| match ch {
            '\u{3000}' => ' ',
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(ch as u32 - 0xFEE0).unwrap_or(ch),
            _ => ch,
        })
        .collect();
    halfwidth.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_unifies_width() {
        assert_eq!(normalize_name("  蘿蔔 "), "蘿蔔");
        assert_eq!(normalize_name("甘藍（高麗菜）"), "甘藍(高麗菜)");
        assert_eq!(normalize_name("小白菜\u{3000}\u{3000}土"), "小白菜 土");
        assert_eq!(normalize_name("ＡＢ１"), "AB1");
    }

    #[test]
    fn leaves_plain_names_untouched() {
        assert_eq!(normalize_name("筍-麻竹筍"), "筍-麻竹筍");
        assert_eq!(normalize_name(""), "");
    }
}

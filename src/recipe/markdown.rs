use super::model::{Ingredient, Recipe};
use chrono::NaiveDateTime;
use std::path::Path;

pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H%M%S";

/// 数量是纯数字（最多一个小数点）时才附上单位
fn is_numeric_amount(amount: &str) -> bool {
    let digits = amount.replacen('.', "", 1);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn ingredient_line(item: &Ingredient) -> String {
    let unit = item.unit.trim();
    if !unit.is_empty() && is_numeric_amount(&item.amount) {
        format!("- {}：{} {}", item.name, item.amount, unit)
    } else {
        format!("- {}：{}", item.name, item.amount)
    }
}

pub fn recipe_file_name(recipe: &Recipe, now: NaiveDateTime) -> String {
    let title: String = recipe
        .name
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect();
    format!("{}_{}.md", now.format(FILE_TIMESTAMP_FORMAT), title)
}

/// 渲染为静态站点用的 markdown（含 front matter）
pub fn render_markdown(recipe: &Recipe, now: NaiveDateTime) -> String {
    let ingredients = recipe
        .ingredients
        .iter()
        .map(ingredient_line)
        .collect::<Vec<_>>()
        .join("\n");
    let steps = recipe
        .steps
        .iter()
        .enumerate()
        .map(|(idx, step)| format!("{}. {}", idx + 1, step))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "---\ntitle: \"{title}\"\ndate: {date}\ndraft: false\n---\n\n### 食材\n\n{ingredients}\n\n### 作法\n\n{steps}\n\n### 每人熱量  \n{calories}\n\n### 成本估算\n- 零售價：{price}\n",
        title = recipe.name.trim().replace('"', "\\\""),
        date = now.format("%Y-%m-%d"),
        calories = recipe.calories,
        price = recipe.price,
    )
}

/// 写入 `dir`，返回文件名
pub fn write_recipe(dir: &Path, recipe: &Recipe, now: NaiveDateTime) -> std::io::Result<String> {
    std::fs::create_dir_all(dir)?;
    let filename = recipe_file_name(recipe, now);
    std::fs::write(dir.join(&filename), render_markdown(recipe, now))?;
    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 18)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    fn recipe() -> Recipe {
        Recipe {
            name: "蘿蔔排骨湯".to_string(),
            ingredients: vec![
                Ingredient {
                    name: "白蘿蔔".into(),
                    amount: "1.5".into(),
                    unit: "斤".into(),
                },
                Ingredient {
                    name: "鹽".into(),
                    amount: "少許".into(),
                    unit: "克".into(),
                },
                Ingredient {
                    name: "排骨".into(),
                    amount: "300".into(),
                    unit: "".into(),
                },
            ],
            steps: vec!["汆燙排骨".into(), "加入蘿蔔燉煮".into()],
            calories: "350 大卡".into(),
            price: "約 120 元".into(),
        }
    }

    #[test]
    fn renders_front_matter_and_sections() {
        let md = render_markdown(&recipe(), now());
        let expected = "---\ntitle: \"蘿蔔排骨湯\"\ndate: 2025-10-18\ndraft: false\n---\n\n### 食材\n\n- 白蘿蔔：1.5 斤\n- 鹽：少許\n- 排骨：300\n\n### 作法\n\n1. 汆燙排骨\n2. 加入蘿蔔燉煮\n\n### 每人熱量  \n350 大卡\n\n### 成本估算\n- 零售價：約 120 元\n";
        assert_eq!(md, expected);
    }

    #[test]
    fn numeric_amount_rules() {
        assert!(is_numeric_amount("2"));
        assert!(is_numeric_amount("0.5"));
        assert!(!is_numeric_amount("1.2.3"));
        assert!(!is_numeric_amount("1/2"));
        assert!(!is_numeric_amount(""));
    }

    #[test]
    fn writes_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let name = write_recipe(&dir.path().join("recipes"), &recipe(), now()).unwrap();
        assert_eq!(name, "2025-10-18-090507_蘿蔔排骨湯.md");
        let body = std::fs::read_to_string(dir.path().join("recipes").join(&name)).unwrap();
        assert!(body.starts_with("---\ntitle: \"蘿蔔排骨湯\""));
    }

    #[test]
    fn file_name_cannot_escape_directory() {
        let mut r = recipe();
        r.name = "../a/b".into();
        assert_eq!(recipe_file_name(&r, now()), "2025-10-18-090507_..-a-b.md");
    }
}

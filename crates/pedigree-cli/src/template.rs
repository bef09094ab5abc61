//! The outline written by the `new` command.

/// Turns a user-supplied name into a file stem. Returns `None` for blank names.
pub fn file_stem(name: &str) -> Option<&str> {
    let name = name.trim();
    let stem = name.strip_suffix(".md").unwrap_or(name).trim();
    (!stem.is_empty()).then_some(stem)
}

/// A starter outline titled `title`, with usage notes below the break.
pub fn outline(title: &str) -> String {
    format!(
        "\
# {title}

## 字辈: 第一代,第二代,第三代,第四代

- 始祖
  - 长子
    - 长孙
      - 曾孙甲
      - 曾孙乙
    - 次孙
  - 次子
    - 孙甲
    - 孙乙

---
# Notes:
# 1. Replace the sample names with your family members.
# 2. The 字辈 line is optional; delete it if the family has no generation names.
# 3. Each member is a line starting with `- ` followed by the name.
# 4. Indent each generation two spaces deeper than its parent.
# 5. Render the tree with `pedigree render <file>`.
"
    )
}

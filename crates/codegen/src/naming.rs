//! Identifier and path normalisation shared by the emitters and the index builder

use hooks_core::{Error, Result};
use std::path::{Component, Path};

/// Turn a file stem or function name into a class-style identifier.
///
/// Whitespace and dots become word breaks, the letter after a break is
/// upper-cased, leading digits are dropped and the first letter is upper-cased:
/// `erc20-token.v2` → `Erc20TokenV2`, `balanceOf` → `BalanceOf`.
pub fn normalize_name(raw: &str) -> Result<String> {
    let mut dashed = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_whitespace() || c == '.' {
            dashed.push('-');
        } else {
            dashed.push(c);
        }
    }

    let mut joined = String::with_capacity(dashed.len());
    let mut chars = dashed.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(next) = chars.peek().copied() {
                if next.is_ascii_lowercase() {
                    joined.push(next.to_ascii_uppercase());
                    chars.next();
                }
            }
            continue;
        }
        joined.push(c);
    }

    let trimmed = joined.trim_start_matches(|c: char| c.is_ascii_digit());
    let normalized = upper_first(trimmed);

    if normalized.is_empty() {
        return Err(Error::parse(format!(
            "Can't guess class name, please rename file: {}",
            raw
        )));
    }

    Ok(normalized)
}

/// Upper-case the first character only
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render a path with forward slashes regardless of platform
pub fn normalize_slashes(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Path of `path` relative to `base`, or `path` itself when it is not below `base`
pub fn relative_to(path: &Path, base: &Path) -> String {
    let base = normalize_slashes(base);
    let path = normalize_slashes(path);

    if base.is_empty() {
        return path;
    }

    match path.strip_prefix(&base) {
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/').to_string(),
        Some("") => String::new(),
        _ => path,
    }
}

/// Drop the `Foo.sol/` directory of `Foo.sol/Foo.json` style artifacts, unless
/// another discovered file shares the same file name.
pub fn shorten_full_json_file_path(path: &str, all_paths: &[String]) -> String {
    let mut segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 2 {
        return path.to_string();
    }

    let file_name = segments[segments.len() - 1];
    let parent = segments[segments.len() - 2];
    if !parent.ends_with(".sol") || !file_name.ends_with(".json") {
        return path.to_string();
    }

    let same_name = all_paths
        .iter()
        .filter(|p| p.rsplit('/').next() == Some(file_name))
        .count();
    if same_name > 1 {
        return path.to_string();
    }

    segments.remove(segments.len() - 2);
    segments.join("/")
}

/// File stem of a forward-slash path: `lib/Token.json` → `Token`
pub fn file_stem(path: &str) -> &str {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(dot) => &file_name[..dot],
    }
}

/// Path without its extension, used as the key pairing `.abi` and `.bin` files
pub fn strip_extension(path: &str) -> &str {
    let file_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[file_start..].rfind('.') {
        Some(0) | None => path,
        Some(dot) => &path[..file_start + dot],
    }
}

/// Name and directory segments of a contract, derived from its relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractPath {
    pub name: String,
    pub path: Vec<String>,
}

pub fn parse_contract_path(path: &str) -> Result<ContractPath> {
    let mut segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string)
        .collect();
    let file_name = segments
        .pop()
        .ok_or_else(|| Error::parse(format!("Empty contract path: {:?}", path)))?;

    Ok(ContractPath {
        name: normalize_name(file_stem(&file_name))?,
        path: segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("balanceOf").unwrap(), "BalanceOf");
        assert_eq!(normalize_name("DsToken").unwrap(), "DsToken");
        assert_eq!(normalize_name("ds-token").unwrap(), "DsToken");
        assert_eq!(normalize_name("ds token.v2").unwrap(), "DsTokenV2");
        assert_eq!(normalize_name("1Token").unwrap(), "Token");
        assert_eq!(normalize_name("ERC20").unwrap(), "ERC20");
        assert!(normalize_name("123").is_err());
    }

    #[test]
    fn test_relative_to() {
        assert_eq!(relative_to(Path::new("abis/lib/B.json"), Path::new("abis")), "lib/B.json");
        assert_eq!(relative_to(Path::new("./abis/A.json"), Path::new("./abis/")), "A.json");
        assert_eq!(relative_to(Path::new("other/A.json"), Path::new("abis")), "other/A.json");
        assert_eq!(relative_to(Path::new("A.json"), Path::new(".")), "A.json");
    }

    #[test]
    fn test_shorten_hardhat_artifact_paths() {
        let all = vec![
            "contracts/Token.sol/Token.json".to_string(),
            "contracts/Vault.sol/Vault.json".to_string(),
            "contracts/v2/Vault.sol/Vault.json".to_string(),
        ];
        assert_eq!(shorten_full_json_file_path(&all[0], &all), "contracts/Token.json");
        // duplicated file names keep their full path
        assert_eq!(shorten_full_json_file_path(&all[1], &all), "contracts/Vault.sol/Vault.json");
        assert_eq!(shorten_full_json_file_path("Token.abi", &all), "Token.abi");
    }

    #[test]
    fn test_strip_extension_and_stem() {
        assert_eq!(strip_extension("lib/Token.abi"), "lib/Token");
        assert_eq!(strip_extension("lib.v1/Token"), "lib.v1/Token");
        assert_eq!(file_stem("lib/Token.bin"), "Token");
    }

    #[test]
    fn test_parse_contract_path() {
        let parsed = parse_contract_path("lib/math/safe-math.json").unwrap();
        assert_eq!(parsed.name, "SafeMath");
        assert_eq!(parsed.path, vec!["lib".to_string(), "math".to_string()]);

        let root = parse_contract_path("A.abi").unwrap();
        assert_eq!(root.name, "A");
        assert!(root.path.is_empty());
    }
}

//! Integration tests for hook generation

use crate::runner::run;
use hooks_core::{CodegenConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// ERC20 token ABI with an overloaded `safeTransfer`
const ERC20_ABI: &str = r#"[
  {
    "type": "constructor",
    "inputs": [{"name": "_name", "type": "string", "internalType": "string"}]
  },
  {
    "type": "function",
    "name": "name",
    "inputs": [],
    "outputs": [{"name": "", "type": "string", "internalType": "string"}],
    "stateMutability": "view"
  },
  {
    "type": "function",
    "name": "balanceOf",
    "inputs": [{"name": "account", "type": "address", "internalType": "address"}],
    "outputs": [{"name": "", "type": "uint256", "internalType": "uint256"}],
    "stateMutability": "view"
  },
  {
    "type": "function",
    "name": "transfer",
    "inputs": [
      {"name": "to", "type": "address", "internalType": "address"},
      {"name": "amount", "type": "uint256", "internalType": "uint256"}
    ],
    "outputs": [{"name": "", "type": "bool", "internalType": "bool"}],
    "stateMutability": "nonpayable"
  },
  {
    "type": "function",
    "name": "safeTransfer",
    "inputs": [
      {"name": "to", "type": "address", "internalType": "address"},
      {"name": "amount", "type": "uint256", "internalType": "uint256"}
    ],
    "outputs": [],
    "stateMutability": "nonpayable"
  },
  {
    "type": "function",
    "name": "safeTransfer",
    "inputs": [
      {"name": "to", "type": "address", "internalType": "address"},
      {"name": "amount", "type": "uint256", "internalType": "uint256"},
      {"name": "data", "type": "bytes", "internalType": "bytes"}
    ],
    "outputs": [],
    "stateMutability": "nonpayable"
  },
  {
    "type": "function",
    "name": "deposit",
    "inputs": [],
    "outputs": [],
    "stateMutability": "payable"
  },
  {
    "type": "event",
    "name": "Transfer",
    "inputs": [
      {"name": "from", "type": "address", "indexed": true},
      {"name": "to", "type": "address", "indexed": true},
      {"name": "value", "type": "uint256", "indexed": false}
    ],
    "anonymous": false
  }
]"#;

/// Hardhat-style artifact carrying NatSpec documentation and bytecode
const VAULT_ARTIFACT: &str = r#"{
  "contractName": "Vault",
  "abi": [
    {
      "type": "function",
      "name": "quote",
      "inputs": [
        {"name": "a", "type": "uint256"},
        {"name": "b", "type": "address"}
      ],
      "outputs": [{"name": "", "type": "uint256"}],
      "stateMutability": "view"
    }
  ],
  "bytecode": "0x6080604052",
  "devdoc": {
    "methods": {
      "quote(uint256,address)": {
        "details": "Quotes a swap",
        "params": {"a": "input amount", "b": "recipient"},
        "return": "output amount"
      }
    }
  },
  "userdoc": {
    "methods": {
      "quote(uint256,address)": {"notice": "Read-only quote"}
    }
  }
}"#;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn config(input_dir: &Path, out_dir: &Path) -> CodegenConfig {
    CodegenConfig {
        input_dir: input_dir.to_path_buf(),
        out_dir: Some(out_dir.to_path_buf()),
        skip_version_check: true,
        ..Default::default()
    }
}

fn generated_queries(out_dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![out_dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else if path.to_string_lossy().ends_with("Queries.ts") {
                found.push(path);
            }
        }
    }
    found.sort();
    found
}

#[tokio::test]
async fn test_end_to_end_erc20_generation() -> Result<()> {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(input.path(), "Token.json", ERC20_ABI);
    write(input.path(), "lib/Pool.abi", ERC20_ABI);

    let summary = run(
        config(input.path(), output.path()),
        &[input.path().to_path_buf()],
    )
    .await?;

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 0);
    // two queries files, the root index and lib/index.ts
    assert_eq!(summary.written, 4);

    let token = fs::read_to_string(output.path().join("TokenQueries.ts")).unwrap();
    assert!(token.contains("export default class TokenQueries {"));
    assert!(token.contains("import { Token__factory } from \"../index.ts\";"));
    assert!(token.contains("useNameQuery = (overrides?: CallOverrides) => {"));
    assert!(token.contains("useBalanceOfQuery = (account: string, overrides?: CallOverrides) => {"));
    assert!(token.contains("useTransferMutation = () => {"));
    assert!(token.contains("Signer is not set"));

    // overloaded names only get signature-keyed hooks
    assert!(token.contains("\"useSafeTransfer(address,uint256)Mutation\" = () => {"));
    assert!(token.contains("\"useSafeTransfer(address,uint256,bytes)Mutation\" = () => {"));
    assert!(!token.contains("useSafeTransferMutation"));
    assert!(token.contains("contract[\"safeTransfer(address,uint256,bytes)\"](to, amount, data, overrides ?? {})"));

    assert!(token.contains("overrides?: PayableOverrides & { from?: string }"));
    assert!(!token.contains("Transfer ="));

    assert!(output.path().join("lib").join("PoolQueries.ts").exists());

    let index = fs::read_to_string(output.path().join("index.ts")).unwrap();
    assert_eq!(
        index,
        "export { default as TokenQueries } from './TokenQueries';\n\
         export { default as PoolQueries } from './lib/PoolQueries';\n"
    );

    let lib_index = fs::read_to_string(output.path().join("lib").join("index.ts")).unwrap();
    assert_eq!(lib_index, "export { default as PoolQueries } from './PoolQueries';\n");

    Ok(())
}

#[tokio::test]
async fn test_split_abi_and_bin_emit_one_file() -> Result<()> {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(input.path(), "Token.abi", ERC20_ABI);
    write(input.path(), "Token.bin", "0x6080604052");
    write(input.path(), "Empty.abi", "[]");
    write(input.path(), "Nothing.bin", "0x");

    let summary = run(
        config(input.path(), output.path()),
        &[input.path().to_path_buf()],
    )
    .await?;

    assert_eq!(summary.processed, 4);
    // the empty ABI and the empty .bin; Token.bin pairs with Token.abi
    assert_eq!(summary.skipped, 2);
    assert_eq!(generated_queries(output.path()), vec![output.path().join("TokenQueries.ts")]);

    let index = fs::read_to_string(output.path().join("index.ts")).unwrap();
    assert_eq!(index, "export { default as TokenQueries } from './TokenQueries';\n");

    Ok(())
}

#[tokio::test]
async fn test_hardhat_artifact_with_documentation() -> Result<()> {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(input.path(), "contracts/Vault.sol/Vault.json", VAULT_ARTIFACT);

    run(config(input.path(), output.path()), &[input.path().to_path_buf()]).await?;

    let vault = fs::read_to_string(output.path().join("contracts").join("VaultQueries.ts")).unwrap();
    assert!(vault.contains(
        "  /**\n   * Quotes a swap\n   * Read-only quote\n   * @param a input amount\n   * @param b recipient\n   * @returns output amount\n   */\n  useQuoteQuery"
    ));
    assert!(vault.contains("useQuery<BigNumber>([\"quote\", \"Vault\", a, b], async () => {"));

    let index = fs::read_to_string(output.path().join("index.ts")).unwrap();
    assert_eq!(index, "export { default as VaultQueries } from './contracts/VaultQueries';\n");

    Ok(())
}

#[tokio::test]
async fn test_skipped_artifacts_are_not_exported() -> Result<()> {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(input.path(), "contracts/Vault.sol/Vault.json", VAULT_ARTIFACT);
    write(
        input.path(),
        "contracts/Vault.sol/Vault.dbg.json",
        r#"{"_format": "hh-sol-dbg-1", "buildInfo": "../../build-info/a1.json"}"#,
    );
    write(input.path(), "Empty.abi", "[]");
    write(input.path(), "Lonely.bin", "0x6080604052");

    let summary = run(config(input.path(), output.path()), &[input.path().to_path_buf()]).await?;

    assert_eq!(summary.processed, 4);
    // Lonely.bin holds bytecode, so it is consumed rather than skipped
    assert_eq!(summary.skipped, 2);

    let index = fs::read_to_string(output.path().join("index.ts")).unwrap();
    assert_eq!(index, "export { default as VaultQueries } from './contracts/VaultQueries';\n");
    let contracts_index = fs::read_to_string(output.path().join("contracts").join("index.ts")).unwrap();
    assert_eq!(contracts_index, "export { default as VaultQueries } from './VaultQueries';\n");

    Ok(())
}

#[tokio::test]
async fn test_always_generate_overloads() -> Result<()> {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(input.path(), "Token.json", ERC20_ABI);

    let mut config = config(input.path(), output.path());
    config.flags.always_generate_overloads = true;
    run(config, &[input.path().to_path_buf()]).await?;

    let token = fs::read_to_string(output.path().join("TokenQueries.ts")).unwrap();
    assert!(token.contains("  useBalanceOfQuery = (account: string, overrides?: CallOverrides) => {"));
    assert!(token.contains("  \"useBalanceOf(address)Query\" = (account: string, overrides?: CallOverrides) => {"));
    // both hooks reach the same contract function
    assert!(token.contains("return await contract.balanceOf(account, overrides ?? {});"));
    assert!(token.contains("return await contract[\"balanceOf(address)\"](account, overrides ?? {});"));
    assert!(!token.contains("useSafeTransferMutation"));

    Ok(())
}

#[tokio::test]
async fn test_generation_is_deterministic() -> Result<()> {
    let input = TempDir::new().unwrap();
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write(input.path(), "Token.json", ERC20_ABI);

    run(config(input.path(), first.path()), &[input.path().to_path_buf()]).await?;
    run(config(input.path(), second.path()), &[input.path().to_path_buf()]).await?;

    assert_eq!(
        fs::read_to_string(first.path().join("TokenQueries.ts")).unwrap(),
        fs::read_to_string(second.path().join("TokenQueries.ts")).unwrap()
    );

    Ok(())
}

#[tokio::test]
async fn test_dry_run_generation() -> Result<()> {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(input.path(), "Token.json", ERC20_ABI);

    let mut config = config(input.path(), output.path());
    config.dry_run = true;
    let summary = run(config, &[input.path().to_path_buf()]).await?;

    assert_eq!(summary.written, 2);
    assert!(fs::read_dir(output.path()).unwrap().next().is_none());

    Ok(())
}

#[tokio::test]
async fn test_malformed_artifact_fails_the_run() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(input.path(), "Broken.json", "{ \"abi\": [");

    let result = run(config(input.path(), output.path()), &[input.path().to_path_buf()]).await;
    assert!(result.is_err());
}

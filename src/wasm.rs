use wasm_bindgen::prelude::*;

use crate::address::Address;
use crate::amm::codec::{self, SwapDirection};
use crate::amm::swap::{self, SwapParams, SwapTokenData};
use crate::config::ScannerConfig;
use crate::pipeline::LpEventAssembler;
use crate::pipeline::locator::locate_instruction;
use crate::types::{LedgerTransaction, WireTransaction};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = JSON)]
    fn parse(s: &str) -> JsValue;
}

fn to_js(value: &serde_json::Value) -> JsValue {
    match serde_json::to_string(value) {
        Ok(json_str) => parse(&json_str),
        Err(_) => JsValue::NULL,
    }
}

fn error_result(msg: &str) -> JsValue {
    let obj = serde_json::json!({"error": msg});
    to_js(&obj)
}

/// Decode a pool-create instruction body into its fields.
#[wasm_bindgen]
pub fn decode_pool_create(data: &[u8]) -> JsValue {
    match codec::decode_pool_create(data) {
        Ok(params) => serde_wasm_bindgen::to_value(&params).unwrap_or(JsValue::NULL),
        Err(e) => error_result(&e.to_string()),
    }
}

/// Encode a swap body. `amount` is a decimal string of base units.
#[wasm_bindgen]
pub fn encode_swap_payload(direction: &str, amount: &str) -> JsValue {
    let Ok(direction) = direction.parse::<SwapDirection>() else {
        return error_result("direction must be \"baseIn\" or \"baseOut\"");
    };
    let Ok(amount) = amount.parse::<u128>() else {
        return error_result("amount must be a non-negative integer string");
    };
    match codec::encode_swap(direction, amount) {
        Ok(data) => to_js(&serde_json::json!({ "data": data.to_vec() })),
        Err(e) => error_result(&e.to_string()),
    }
}

/// Locate and assemble the pool-create record of a transaction JSON, without
/// enrichment or persistence. Returns `null` for irrelevant transactions.
#[wasm_bindgen]
pub fn assemble_lp_event(transaction_json: &str, config_json: Option<String>) -> JsValue {
    let config = match config_json.as_deref().map(ScannerConfig::from_json) {
        None => ScannerConfig::default(),
        Some(Ok(c)) => c,
        Some(Err(e)) => return error_result(&e.to_string()),
    };

    let wire: WireTransaction = match serde_json::from_str(transaction_json) {
        Ok(w) => w,
        Err(_) => return error_result("Invalid transaction JSON"),
    };
    let tx = match LedgerTransaction::try_from(wire) {
        Ok(tx) => tx,
        Err(e) => return error_result(&e.to_string()),
    };
    let Some(located) = locate_instruction(&tx, &config.amm_program_id) else {
        return JsValue::NULL;
    };

    match LpEventAssembler::new(&config).assemble(&located, &tx.account_keys) {
        Ok(event) => match serde_json::to_value(&event) {
            Ok(v) => to_js(&v),
            Err(e) => error_result(&e.to_string()),
        },
        Err(e) => error_result(&e.to_string()),
    }
}

/// Build a swap instruction from a persisted pool record.
#[wasm_bindgen]
pub fn build_swap_instruction(
    record_json: &str,
    source: &str,
    destination: &str,
    signer: &str,
    ui_amount: f64,
    direction: &str,
) -> JsValue {
    let token_data: SwapTokenData = match serde_json::from_str(record_json) {
        Ok(d) => d,
        Err(_) => return error_result("Invalid pool record JSON"),
    };
    let (Ok(source_account), Ok(destination_account), Ok(signer)) = (
        source.parse::<Address>(),
        destination.parse::<Address>(),
        signer.parse::<Address>(),
    ) else {
        return error_result("source, destination and signer must be base58 addresses");
    };
    let Ok(direction) = direction.parse::<SwapDirection>() else {
        return error_result("direction must be \"baseIn\" or \"baseOut\"");
    };
    let amount = match swap::scale_ui_amount(ui_amount, token_data.decimals_or_default()) {
        Ok(a) => a,
        Err(e) => return error_result(&e.to_string()),
    };

    let params = SwapParams {
        token_data,
        source_account,
        destination_account,
        signer,
        amount,
        direction,
    };
    match swap::build_swap_instruction(&params) {
        Ok(ix) => match serde_json::to_value(&ix) {
            Ok(v) => to_js(&v),
            Err(e) => error_result(&e.to_string()),
        },
        Err(e) => error_result(&e.to_string()),
    }
}

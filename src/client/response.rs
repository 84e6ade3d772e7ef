//! Defensive parsing of `calcularFrete` responses.
//!
//! The wire format is not under our control, so fields are extracted with
//! namespace-tolerant patterns rather than a full XML model: a well-formed
//! reply carries `CodigoProc` (1 on success) and a `DadosFrete` block with
//! `ValorServico` (comma-decimal BRL) and `Prazo` (integer days). Anything
//! else is a malformed response.

use regex::Regex;
use std::sync::LazyLock;

use super::QuoteResult;
use crate::error_handling::QuoteError;

/// Compiles a built-in pattern, panicking with a detailed message if it is
/// invalid. Used only for compile-time constant patterns.
fn compile_pattern(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile built-in pattern '{}': {}. This is a programming error.",
            pattern, e
        )
    })
}

static CODIGO_PROC: LazyLock<Regex> = LazyLock::new(|| {
    compile_pattern(r"<(?:\w+:)?CodigoProc>\s*(-?\d+)\s*</(?:\w+:)?CodigoProc>")
});

static VALOR_SERVICO: LazyLock<Regex> = LazyLock::new(|| {
    compile_pattern(r"<(?:\w+:)?ValorServico>\s*([0-9.,]+)\s*</(?:\w+:)?ValorServico>")
});

static PRAZO: LazyLock<Regex> =
    LazyLock::new(|| compile_pattern(r"<(?:\w+:)?Prazo>\s*(\d+)\s*</(?:\w+:)?Prazo>"));

pub(crate) fn parse_quote_response(body: &str) -> Result<QuoteResult, QuoteError> {
    let proc_code = capture(&CODIGO_PROC, body)
        .ok_or_else(|| QuoteError::MalformedResponse("response missing CodigoProc".into()))?
        .parse::<i64>()
        .map_err(|_| QuoteError::MalformedResponse("unparseable CodigoProc".into()))?;

    // Any non-1 code means the provider declined to quote this cell, which
    // includes destinations it does not service.
    if proc_code != 1 {
        return Err(QuoteError::MalformedResponse(format!(
            "provider declined the quote (CodigoProc {})",
            proc_code
        )));
    }

    let raw_cost = capture(&VALOR_SERVICO, body)
        .ok_or_else(|| QuoteError::MalformedResponse("response missing ValorServico".into()))?;
    let money_cost = parse_brl_decimal(raw_cost)?;

    let time_days = capture(&PRAZO, body)
        .ok_or_else(|| QuoteError::MalformedResponse("response missing Prazo".into()))?
        .parse::<u32>()
        .map_err(|_| QuoteError::MalformedResponse("unparseable Prazo".into()))?;

    Ok(QuoteResult {
        money_cost,
        time_days,
    })
}

fn capture<'a>(pattern: &Regex, body: &'a str) -> Option<&'a str> {
    pattern
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Parses Brazilian decimal notation (`1.234,56`), tolerating plain
/// dot-decimal values should the provider ever emit them.
fn parse_brl_decimal(raw: &str) -> Result<f64, QuoteError> {
    let normalized = if raw.contains(',') {
        raw.replace('.', "").replace(',', ".")
    } else {
        raw.to_owned()
    };
    normalized.parse::<f64>().map_err(|_| {
        QuoteError::MalformedResponse(format!("unparseable decimal value '{}'", raw))
    })
}

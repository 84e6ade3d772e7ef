//! SOAP 1.1 envelope construction for the `calcularFrete` operation.
//!
//! The provider expects Brazilian decimal notation: kilograms and declared
//! value use a comma as the decimal separator, the destination CEP is
//! zero-padded to eight digits, and dimensions are plain integers in cm.

use super::QuoteRequest;

pub(crate) fn build_quote_envelope(request: &QuoteRequest) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body>
    <calcularFrete>
      <TipoServico>{tipo}</TipoServico>
      <CepDestino>{cep:08}</CepDestino>
      <Peso>{peso}</Peso>
      <ValorDeclarado>{valor}</ValorDeclarado>
      <TipoEntrega>0</TipoEntrega>
      <ServicoCOD>false</ServicoCOD>
      <Altura>{altura}</Altura>
      <Largura>{largura}</Largura>
      <Profundidade>{profundidade}</Profundidade>
    </calcularFrete>
  </soapenv:Body>
</soapenv:Envelope>"#,
        tipo = request.tier.provider_code(),
        cep = request.destination,
        peso = format_weight_kg(request.weight_grams),
        valor = format_decimal_comma(request.declared_value),
        altura = request.dimensions.height_cm,
        largura = request.dimensions.width_cm,
        profundidade = request.dimensions.depth_cm,
    )
}

/// Converts grams to kilograms in the provider's comma-decimal format.
pub(crate) fn format_weight_kg(weight_grams: u32) -> String {
    format_decimal_comma(f64::from(weight_grams) / 1000.0)
}

/// Formats a decimal with two places and a comma separator, e.g. `"1,50"`.
pub(crate) fn format_decimal_comma(value: f64) -> String {
    format!("{:.2}", value).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceTier;
    use crate::client::Dimensions;

    fn request() -> QuoteRequest {
        QuoteRequest {
            tier: ServiceTier::Express,
            destination: 1_000_001,
            weight_grams: 1_500,
            declared_value: 0.0,
            dimensions: Dimensions {
                height_cm: 10,
                width_cm: 15,
                depth_cm: 20,
            },
        }
    }

    #[test]
    fn test_weight_uses_comma_decimal_kilograms() {
        assert_eq!(format_weight_kg(1_500), "1,50");
        assert_eq!(format_weight_kg(250), "0,25");
        assert_eq!(format_weight_kg(10_000), "10,00");
    }

    #[test]
    fn test_decimal_comma_formatting() {
        assert_eq!(format_decimal_comma(0.0), "0,00");
        assert_eq!(format_decimal_comma(123.4), "123,40");
    }

    #[test]
    fn test_envelope_fields() {
        let envelope = build_quote_envelope(&request());
        assert!(envelope.contains("<TipoServico>EXP</TipoServico>"));
        // CEP is zero-padded to eight digits on the wire
        assert!(envelope.contains("<CepDestino>01000001</CepDestino>"));
        assert!(envelope.contains("<Peso>1,50</Peso>"));
        assert!(envelope.contains("<ValorDeclarado>0,00</ValorDeclarado>"));
        assert!(envelope.contains("<TipoEntrega>0</TipoEntrega>"));
        assert!(envelope.contains("<ServicoCOD>false</ServicoCOD>"));
        assert!(envelope.contains("<Altura>10</Altura>"));
        assert!(envelope.contains("<Largura>15</Largura>"));
        assert!(envelope.contains("<Profundidade>20</Profundidade>"));
    }

    #[test]
    fn test_envelope_uses_standard_code_for_standard_tier() {
        let mut req = request();
        req.tier = ServiceTier::Standard;
        let envelope = build_quote_envelope(&req);
        assert!(envelope.contains("<TipoServico>STD</TipoServico>"));
    }
}

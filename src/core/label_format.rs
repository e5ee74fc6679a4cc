//! Label printing options: paper format, document format and how the API
//! hands the documents back.

/// Physical print format of a label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PrintFormat {
    /// Whatever is configured in the DHL business portal. Not sent.
    Gui,
    A4,
    /// 910-300-700
    Laser103x199,
    /// 910-300-700-oZ
    Laser103x199NoAddition,
    /// 910-300-600
    #[default]
    Thermo103x199,
    /// 910-300-610
    Thermo103x199Addition,
    /// 910-300-710
    Laser105x208,
}

impl PrintFormat {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Gui => "GUI",
            Self::A4 => "A4",
            Self::Laser103x199 => "910-300-700",
            Self::Laser103x199NoAddition => "910-300-700-oZ",
            Self::Thermo103x199 => "910-300-600",
            Self::Thermo103x199Addition => "910-300-610",
            Self::Laser105x208 => "910-300-710",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "GUI" => Some(Self::Gui),
            "A4" => Some(Self::A4),
            "910-300-700" => Some(Self::Laser103x199),
            "910-300-700-oZ" => Some(Self::Laser103x199NoAddition),
            "910-300-600" => Some(Self::Thermo103x199),
            "910-300-610" => Some(Self::Thermo103x199Addition),
            "910-300-710" => Some(Self::Laser105x208),
            _ => None,
        }
    }

    /// Value for a query parameter; `None` leaves the choice to the portal.
    fn query_value(&self) -> Option<&'static str> {
        match self {
            Self::Gui => None,
            other => Some(other.code()),
        }
    }
}

/// Document encoding of labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocFormat {
    #[default]
    Pdf,
    Zpl2,
}

impl DocFormat {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Zpl2 => "ZPL2",
        }
    }
}

/// How documents are returned: as download URLs or embedded in the reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseType {
    Url,
    #[default]
    Base64,
    Xml,
    Zpl2,
}

impl ResponseType {
    /// Value of the `includeDocs` query parameter.
    pub fn include_docs(&self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::Base64 | Self::Xml | Self::Zpl2 => "include",
        }
    }
}

/// Label options applied to every label-producing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelFormat {
    pub label: PrintFormat,
    pub retoure: PrintFormat,
    pub doc_format: DocFormat,
    pub response_type: ResponseType,
    /// Print shipment and return label on one page. `None` keeps the API
    /// default.
    pub combined_printing: Option<bool>,
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self {
            label: PrintFormat::default(),
            retoure: PrintFormat::default(),
            doc_format: DocFormat::default(),
            response_type: ResponseType::default(),
            combined_printing: Some(true),
        }
    }
}

impl LabelFormat {
    pub fn label(mut self, format: PrintFormat) -> Self {
        self.label = format;
        self
    }

    pub fn retoure(mut self, format: PrintFormat) -> Self {
        self.retoure = format;
        self
    }

    pub fn doc_format(mut self, format: DocFormat) -> Self {
        self.doc_format = format;
        self
    }

    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    pub fn combined_printing(mut self, combined: Option<bool>) -> Self {
        self.combined_printing = combined;
        self
    }

    /// `includeDocs`, `docFormat`, `printFormat`, `retourePrintFormat` and
    /// `combine`, in that order, skipping unset values.
    pub fn query_pairs(&self) -> Vec<(&'static str, &'static str)> {
        let mut pairs = vec![
            ("includeDocs", self.response_type.include_docs()),
            ("docFormat", self.doc_format.code()),
        ];
        if let Some(format) = self.label.query_value() {
            pairs.push(("printFormat", format));
        }
        if let Some(format) = self.retoure.query_value() {
            pairs.push(("retourePrintFormat", format));
        }
        if let Some(combined) = self.combined_printing {
            pairs.push(("combine", if combined { "true" } else { "false" }));
        }
        pairs
    }
}

//! Minimal in-memory TrueType fonts.
//!
//! Only the tables the parser needs are emitted: `head`, `hhea`, `maxp`, `hmtx`, `cmap`
//! (format 12), `name`, and `OS/2` when a weight is set. Glyph 0 is `.notdef`; every mapped
//! character gets its own glyph with the configured advance.

pub(crate) struct TestFont {
    family: Option<String>,
    style: Option<String>,
    typographic: Option<(String, String)>,
    weight: Option<u16>,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    line_gap: i16,
    notdef_advance: u16,
    advances: Vec<(char, u16)>,
}

impl TestFont {
    pub(crate) fn new(family: &str) -> Self {
        Self {
            family: Some(family.to_string()),
            style: Some("Regular".to_string()),
            typographic: None,
            weight: None,
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
            line_gap: 0,
            notdef_advance: 500,
            advances: Vec::new(),
        }
    }

    pub(crate) fn without_family(mut self) -> Self {
        self.family = None;
        self
    }

    pub(crate) fn style(mut self, style: &str) -> Self {
        self.style = Some(style.to_string());
        self
    }

    /// Adds typographic family/subfamily names (ids 16/17).
    pub(crate) fn typographic(mut self, family: &str, style: &str) -> Self {
        self.typographic = Some((family.to_string(), style.to_string()));
        self
    }

    pub(crate) fn weight(mut self, weight: u16) -> Self {
        self.weight = Some(weight);
        self
    }

    pub(crate) fn line_gap(mut self, line_gap: i16) -> Self {
        self.line_gap = line_gap;
        self
    }

    pub(crate) fn advance(mut self, ch: char, advance: u16) -> Self {
        self.advances.push((ch, advance));
        self
    }

    /// Maps every character of `chars` to `advance`.
    pub(crate) fn advances(mut self, chars: &str, advance: u16) -> Self {
        for ch in chars.chars() {
            self.advances.push((ch, advance));
        }
        self
    }

    pub(crate) fn build(mut self) -> Vec<u8> {
        self.advances.sort_by_key(|(ch, _)| *ch);
        self.advances.dedup_by_key(|(ch, _)| *ch);
        let num_glyphs = u16::try_from(self.advances.len() + 1).expect("too many glyphs");

        let mut tables: Vec<([u8; 4], Vec<u8>)> = vec![
            (*b"head", self.head()),
            (*b"hhea", self.hhea(num_glyphs)),
            (*b"maxp", maxp(num_glyphs)),
            (*b"hmtx", self.hmtx()),
            (*b"cmap", self.cmap()),
            (*b"name", self.name()),
        ];
        if let Some(weight) = self.weight {
            tables.push((*b"OS/2", self.os2(weight)));
        }
        tables.sort_by_key(|(tag, _)| *tag);

        let num_tables = tables.len() as u16;
        let mut out = Vec::new();
        out.extend(0x0001_0000u32.to_be_bytes());
        out.extend(num_tables.to_be_bytes());
        out.extend([0u8; 6]);

        let mut offset = 12 + 16 * tables.len();
        let mut body = Vec::new();
        for (tag, data) in &tables {
            out.extend(tag);
            out.extend(0u32.to_be_bytes());
            out.extend((offset as u32).to_be_bytes());
            out.extend((data.len() as u32).to_be_bytes());
            body.extend(data);
            while body.len() % 4 != 0 {
                body.push(0);
            }
            offset = 12 + 16 * tables.len() + body.len();
        }
        out.extend(body);
        out
    }

    fn head(&self) -> Vec<u8> {
        let mut t = Vec::with_capacity(54);
        t.extend(0x0001_0000u32.to_be_bytes()); // version
        t.extend(0x0001_0000u32.to_be_bytes()); // fontRevision
        t.extend(0u32.to_be_bytes()); // checksumAdjustment
        t.extend(0x5F0F_3CF5u32.to_be_bytes()); // magicNumber
        t.extend(0u16.to_be_bytes()); // flags
        t.extend(self.units_per_em.to_be_bytes());
        t.extend(0u64.to_be_bytes()); // created
        t.extend(0u64.to_be_bytes()); // modified
        t.extend(0i16.to_be_bytes()); // xMin
        t.extend(self.descender.to_be_bytes()); // yMin
        t.extend((self.units_per_em as i16).to_be_bytes()); // xMax
        t.extend(self.ascender.to_be_bytes()); // yMax
        t.extend(0u16.to_be_bytes()); // macStyle
        t.extend(8u16.to_be_bytes()); // lowestRecPPEM
        t.extend(2i16.to_be_bytes()); // fontDirectionHint
        t.extend(0i16.to_be_bytes()); // indexToLocFormat
        t.extend(0i16.to_be_bytes()); // glyphDataFormat
        debug_assert_eq!(t.len(), 54);
        t
    }

    fn hhea(&self, num_glyphs: u16) -> Vec<u8> {
        let max_advance = self
            .advances
            .iter()
            .map(|(_, a)| *a)
            .chain([self.notdef_advance])
            .max()
            .unwrap_or(0);
        let mut t = Vec::with_capacity(36);
        t.extend(0x0001_0000u32.to_be_bytes());
        t.extend(self.ascender.to_be_bytes());
        t.extend(self.descender.to_be_bytes());
        t.extend(self.line_gap.to_be_bytes());
        t.extend(max_advance.to_be_bytes());
        t.extend(0i16.to_be_bytes()); // minLeftSideBearing
        t.extend(0i16.to_be_bytes()); // minRightSideBearing
        t.extend((max_advance as i16).to_be_bytes()); // xMaxExtent
        t.extend(1i16.to_be_bytes()); // caretSlopeRise
        t.extend(0i16.to_be_bytes()); // caretSlopeRun
        t.extend(0i16.to_be_bytes()); // caretOffset
        t.extend([0u8; 8]); // reserved
        t.extend(0i16.to_be_bytes()); // metricDataFormat
        t.extend(num_glyphs.to_be_bytes());
        debug_assert_eq!(t.len(), 36);
        t
    }

    fn hmtx(&self) -> Vec<u8> {
        let mut t = Vec::new();
        let glyph_advances = self.advances.iter().map(|(_, a)| *a);
        for advance in std::iter::once(self.notdef_advance).chain(glyph_advances) {
            t.extend(advance.to_be_bytes());
            t.extend(0i16.to_be_bytes());
        }
        t
    }

    fn cmap(&self) -> Vec<u8> {
        let groups = self.advances.len() as u32;
        let mut t = Vec::new();
        t.extend(0u16.to_be_bytes()); // version
        t.extend(1u16.to_be_bytes()); // numTables
        t.extend(3u16.to_be_bytes()); // platform: Windows
        t.extend(10u16.to_be_bytes()); // encoding: Unicode full repertoire
        t.extend(12u32.to_be_bytes()); // subtable offset
        t.extend(12u16.to_be_bytes()); // format
        t.extend(0u16.to_be_bytes()); // reserved
        t.extend((16 + 12 * groups).to_be_bytes()); // length
        t.extend(0u32.to_be_bytes()); // language
        t.extend(groups.to_be_bytes());
        for (idx, (ch, _)) in self.advances.iter().enumerate() {
            let code = *ch as u32;
            t.extend(code.to_be_bytes());
            t.extend(code.to_be_bytes());
            t.extend((idx as u32 + 1).to_be_bytes());
        }
        t
    }

    fn name(&self) -> Vec<u8> {
        let mut records: Vec<(u16, Vec<u8>)> = Vec::new();
        if let Some(family) = &self.family {
            records.push((1, utf16_be(family)));
        }
        if let Some(style) = &self.style {
            records.push((2, utf16_be(style)));
        }
        if let Some((family, style)) = &self.typographic {
            records.push((16, utf16_be(family)));
            records.push((17, utf16_be(style)));
        }

        let count = records.len() as u16;
        let mut t = Vec::new();
        t.extend(0u16.to_be_bytes()); // format
        t.extend(count.to_be_bytes());
        t.extend((6 + 12 * count).to_be_bytes()); // storage offset
        let mut storage: Vec<u8> = Vec::new();
        for (name_id, data) in &records {
            t.extend(3u16.to_be_bytes()); // platform: Windows
            t.extend(1u16.to_be_bytes()); // encoding: Unicode BMP
            t.extend(0x0409u16.to_be_bytes()); // language: en-US
            t.extend(name_id.to_be_bytes());
            t.extend((data.len() as u16).to_be_bytes());
            t.extend((storage.len() as u16).to_be_bytes());
            storage.extend(data);
        }
        t.extend(storage);
        t
    }

    fn os2(&self, weight: u16) -> Vec<u8> {
        let mut t = Vec::with_capacity(78);
        t.extend(0u16.to_be_bytes()); // version
        t.extend(500i16.to_be_bytes()); // xAvgCharWidth
        t.extend(weight.to_be_bytes()); // usWeightClass
        t.extend(5u16.to_be_bytes()); // usWidthClass
        t.extend(0u16.to_be_bytes()); // fsType
        t.extend([0u8; 16]); // subscript/superscript metrics
        t.extend(0i16.to_be_bytes()); // yStrikeoutSize
        t.extend(0i16.to_be_bytes()); // yStrikeoutPosition
        t.extend(0i16.to_be_bytes()); // sFamilyClass
        t.extend([0u8; 10]); // panose
        t.extend([0u8; 16]); // ulUnicodeRange1-4
        t.extend(*b"TEST"); // achVendID
        t.extend(0u16.to_be_bytes()); // fsSelection
        t.extend(0x20u16.to_be_bytes()); // usFirstCharIndex
        t.extend(0x7Eu16.to_be_bytes()); // usLastCharIndex
        t.extend(self.ascender.to_be_bytes()); // sTypoAscender
        t.extend(self.descender.to_be_bytes()); // sTypoDescender
        t.extend(self.line_gap.to_be_bytes()); // sTypoLineGap
        t.extend((self.ascender as u16).to_be_bytes()); // usWinAscent
        t.extend((-self.descender as u16).to_be_bytes()); // usWinDescent
        debug_assert_eq!(t.len(), 78);
        t
    }
}

fn maxp(num_glyphs: u16) -> Vec<u8> {
    let mut t = Vec::with_capacity(6);
    t.extend(0x0000_5000u32.to_be_bytes());
    t.extend(num_glyphs.to_be_bytes());
    t
}

fn utf16_be(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

/// A regular face where ASCII letters are 500 units wide and the space is 250.
pub(crate) fn sample_font(family: &str) -> Vec<u8> {
    TestFont::new(family)
        .advances("abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ", 500)
        .advance(' ', 250)
        .weight(400)
        .build()
}

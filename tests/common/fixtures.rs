//! Static verse corpora used across harnesses.

/// Header of every fixture corpus.
pub const HEADER: &str = "BUCH\tKAP\tVERSNR\tVERS";

/// A small German/English mix with a few awkward rows.
///
/// Line numbers (1-based, header is line 1):
///
/// | line | VERS |
/// |------|------|
/// | 2 | In the beginning God created the heaven and the earth. |
/// | 3 | And the earth was without form, and void. |
/// | 4 | And God said, Let there be light: and there was light. |
/// | 5 | Im Anfang war das Wort, und das Wort war bei Gott. |
/// | 6 | (malformed, only two fields) |
/// | 7 | Und Gott sprach: Es werde Licht! Und es ward Licht. |
/// | 8 | The LORD is my shepherd; I shall not want. |
pub const SAMPLE_ROWS: &[&str] = &[
    "Gen\t1\t1\tIn the beginning God created the heaven and the earth.",
    "Gen\t1\t2\tAnd the earth was without form, and void.",
    "Gen\t1\t3\tAnd God said, Let there be light: and there was light.",
    "Joh\t1\t1\tIm Anfang war das Wort, und das Wort war bei Gott.",
    "Gen\t1",
    "1Mo\t1\t3\tUnd Gott sprach: Es werde Licht! Und es ward Licht.",
    "Ps\t23\t1\tThe LORD is my shepherd; I shall not want.",
];

/// The sample corpus as file contents.
pub fn sample_corpus() -> String {
    let mut text = String::from(HEADER);
    for row in SAMPLE_ROWS {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

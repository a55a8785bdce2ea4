//! Translation of nucleotide sequences into proteins
use crate::models::sequence::{split_into_codons, to_rna, validate_sequence};
use crate::models::{GeneticCode, GeneticCodeTable, TranslationOptions, STOP};
use crate::utils::errors::SequenceError;

/// Amino acid symbol of internal stop codons that do not end the translation
pub const INTERNAL_STOP: char = '-';

/// Translates nucleotide sequences using the genetic code of its [`TranslationOptions`]
///
/// # Examples
/// ```rust
/// use gbconvert::models::{GeneticCodeTable, TranslationOptions};
/// use gbconvert::translator::Translator;
///
/// let translator = Translator::new(TranslationOptions::new(GeneticCodeTable::Standard));
/// assert_eq!(translator.translate("ATGCGATACTAGCTAAGGCTA", false).unwrap(), "MRY");
///
/// let translator = Translator::new(TranslationOptions::new(
///     GeneticCodeTable::InvertebrateMitochondrial,
/// ));
/// assert_eq!(translator.translate("ATGCGATAAAGA", false).unwrap(), "MR-S");
/// ```
#[derive(Debug, Clone)]
pub struct Translator {
    options: TranslationOptions,
    code: GeneticCode,
}

impl Default for Translator {
    fn default() -> Self {
        Translator::new(TranslationOptions::default())
    }
}

impl Translator {
    pub fn new(options: TranslationOptions) -> Self {
        Translator {
            code: GeneticCode::for_table(options.genetic_code_table),
            options,
        }
    }

    pub fn options(&self) -> &TranslationOptions {
        &self.options
    }

    pub fn genetic_code(&self) -> &GeneticCode {
        &self.code
    }

    /// Internal stop codons are translated as `-` for the invertebrate
    /// mitochondrial code or when explicitly enabled
    fn allows_internal_stops(&self) -> bool {
        self.options.genetic_code_table == GeneticCodeTable::InvertebrateMitochondrial
            || self.options.allow_internal_stop_codons
    }

    /// Translates a nucleotide sequence into a protein
    ///
    /// The translation covers all codons up to the last complete codon that is
    /// not a stop codon, so trailing stop codons and incomplete codons are
    /// never part of the protein. The first codon is translated as a start codon.
    ///
    /// Stop codons before that point end the translation, unless internal stop
    /// codons are allowed, in which case they are translated as `-`.
    ///
    /// Set `is_rna` if the sequence already uses `U` instead of `T`.
    ///
    /// # Errors
    /// [`SequenceError::InvalidSequence`] if the sequence contains anything but nucleotides
    ///
    /// # Examples
    /// ```rust
    /// use gbconvert::models::{GeneticCodeTable, TranslationOptions};
    /// use gbconvert::translator::Translator;
    ///
    /// let translator = Translator::new(TranslationOptions::new(
    ///     GeneticCodeTable::VertebrateMitochondrial,
    /// ));
    /// assert_eq!(translator.translate("AUGCGAAGAUAA", true).unwrap(), "MR");
    /// assert_eq!(translator.translate("", false).unwrap(), "");
    /// assert!(translator.translate("ATGNNN", false).is_err());
    /// ```
    pub fn translate(&self, sequence: &str, is_rna: bool) -> Result<String, SequenceError> {
        let sequence = validate_sequence(sequence)?;
        let rna = if is_rna { sequence } else { to_rna(&sequence) };
        let codons = split_into_codons(&rna);
        let allow_internal = self.allows_internal_stops();

        let last = match codons
            .iter()
            .rposition(|codon| codon.len() == 3 && !self.code.is_stop_codon(codon))
        {
            Some(idx) => idx,
            None => return Ok(String::new()),
        };

        let mut protein = String::with_capacity(last + 1);
        for (idx, codon) in codons[..=last].iter().enumerate() {
            let aa = if idx == 0 {
                self.code.translate_start_codon(codon)
            } else {
                self.code.translate(codon)
            };
            if aa == STOP {
                if !allow_internal {
                    break;
                }
                protein.push(INTERNAL_STOP);
            } else {
                protein.push(aa);
            }
        }
        Ok(protein)
    }

    /// Translates the DNA of a coding feature
    ///
    /// Same as [`Translator::translate`], but appends `*` if the feature ends
    /// with a stop codon and the options request to include it.
    ///
    /// # Examples
    /// ```rust
    /// use gbconvert::models::{GeneticCodeTable, TranslationOptions};
    /// use gbconvert::translator::Translator;
    ///
    /// let mut options = TranslationOptions::new(GeneticCodeTable::Standard);
    /// assert_eq!(Translator::new(options).translate_feature("ATGAAATAA").unwrap(), "MK");
    ///
    /// options.include_stop_codon = true;
    /// assert_eq!(Translator::new(options).translate_feature("ATGAAATAA").unwrap(), "MK*");
    /// assert_eq!(Translator::new(options).translate_feature("ATGAAA").unwrap(), "MK");
    /// ```
    pub fn translate_feature(&self, dna: &str) -> Result<String, SequenceError> {
        let mut protein = self.translate(dna, false)?;
        if self.options.include_stop_codon && self.ends_with_stop_codon(&validate_sequence(dna)?) {
            protein.push(STOP);
        }
        Ok(protein)
    }

    /// `dna` must be cleaned by [`validate_sequence`]
    fn ends_with_stop_codon(&self, dna: &str) -> bool {
        let rna = to_rna(dna);
        split_into_codons(&rna)
            .into_iter()
            .rev()
            .find(|codon| codon.len() == 3)
            .map(|codon| self.code.is_stop_codon(codon))
            .unwrap_or(false)
    }

    /// Returns all open reading frames of the three forward frames
    ///
    /// An ORF starts at any start codon and ends before the next in-frame stop
    /// codon. ORFs that are still open at the end of the sequence are reported
    /// as well. Results are ordered by frame.
    ///
    /// # Examples
    /// ```rust
    /// use gbconvert::models::{GeneticCodeTable, TranslationOptions};
    /// use gbconvert::translator::Translator;
    ///
    /// let translator = Translator::new(TranslationOptions::new(GeneticCodeTable::Standard));
    /// let orfs = translator.find_open_reading_frames("ATGAAATAGGATGCCC", false).unwrap();
    /// assert_eq!(orfs, vec!["MK".to_string(), "MP".to_string()]);
    /// ```
    pub fn find_open_reading_frames(
        &self,
        sequence: &str,
        is_rna: bool,
    ) -> Result<Vec<String>, SequenceError> {
        let sequence = validate_sequence(sequence)?;
        let rna = if is_rna { sequence } else { to_rna(&sequence) };

        let mut orfs = Vec::new();
        for frame in 0..3 {
            let Some(framed) = rna.get(frame..) else {
                continue;
            };
            let mut current: Option<String> = None;
            for codon in split_into_codons(framed) {
                if codon.len() < 3 {
                    break;
                }
                match current.as_mut() {
                    None => {
                        if self.code.is_start_codon(codon) {
                            current = Some(self.code.translate_start_codon(codon).to_string());
                        }
                    }
                    Some(orf) => {
                        if self.code.is_stop_codon(codon) {
                            orfs.push(std::mem::take(orf));
                            current = None;
                        } else {
                            orf.push(self.code.translate(codon));
                        }
                    }
                }
            }
            if let Some(orf) = current {
                orfs.push(orf);
            }
        }
        Ok(orfs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator(table: GeneticCodeTable) -> Translator {
        Translator::new(TranslationOptions::new(table))
    }

    #[test]
    fn test_standard_ends_at_internal_stop() {
        let t = translator(GeneticCodeTable::Standard);
        assert_eq!(t.translate("ATGCGATACTAGCTAAGGCTA", false).unwrap(), "MRY");
    }

    #[test]
    fn test_invertebrate_alternative_codons() {
        let t = translator(GeneticCodeTable::InvertebrateMitochondrial);
        assert_eq!(t.translate("ATAAGACTAGGATGA", false).unwrap(), "MSLGW");
    }

    #[test]
    fn test_vertebrate_trailing_stops() {
        let t = translator(GeneticCodeTable::VertebrateMitochondrial);
        assert_eq!(t.translate("ATGCGAAGATAA", false).unwrap(), "MR");
    }

    #[test]
    fn test_invertebrate_internal_stop() {
        let t = translator(GeneticCodeTable::InvertebrateMitochondrial);
        assert_eq!(t.translate("ATGCGATAAAGA", false).unwrap(), "MR-S");
    }

    #[test]
    fn test_allow_internal_stops_flag() {
        let mut options = TranslationOptions::new(GeneticCodeTable::Standard);
        assert_eq!(
            Translator::new(options).translate("ATGTAAAAA", false).unwrap(),
            "M"
        );
        options.allow_internal_stop_codons = true;
        assert_eq!(
            Translator::new(options).translate("ATGTAAAAA", false).unwrap(),
            "M-K"
        );
    }

    #[test]
    fn test_stop_free_length() {
        let t = translator(GeneticCodeTable::Standard);
        for seq in ["ATG", "ATGC", "ATGCC", "ATGCCCGGG", "ATGCCCGGGAA"] {
            let protein = t.translate(seq, false).unwrap();
            assert_eq!(protein.len(), seq.len() / 3, "{}", seq);
        }
    }

    #[test]
    fn test_first_codon_is_start() {
        let t = translator(GeneticCodeTable::Standard);
        // GTG is Valine, but Methionine as a start codon
        assert_eq!(t.translate("GTGGTG", false).unwrap(), "MV");
    }

    #[test]
    fn test_only_stops() {
        let t = translator(GeneticCodeTable::Standard);
        assert_eq!(t.translate("TAATAG", false).unwrap(), "");
        assert_eq!(t.translate("AT", false).unwrap(), "");
    }

    #[test]
    fn test_rna_input_and_whitespace() {
        let t = translator(GeneticCodeTable::Standard);
        assert_eq!(t.translate("aug cga\nuac", true).unwrap(), "MRY");
    }

    #[test]
    fn test_invalid_sequence() {
        let t = translator(GeneticCodeTable::Standard);
        assert_eq!(
            t.translate("ATGXCC", false).unwrap_err(),
            SequenceError::InvalidSequence {
                character: 'X',
                position: 3
            }
        );
    }

    #[test]
    fn test_fallback_table_uses_options_for_internal_stops() {
        // Yeast mitochondrial uses the invertebrate data, but internal stops
        // are only allowed for the invertebrate table itself
        let t = translator(GeneticCodeTable::YeastMitochondrial);
        assert_eq!(
            t.genetic_code().table(),
            GeneticCodeTable::InvertebrateMitochondrial
        );
        assert_eq!(t.translate("ATGCGATAAAGA", false).unwrap(), "MR");
    }

    #[test]
    fn test_translate_feature_with_stop() {
        let mut options = TranslationOptions::new(GeneticCodeTable::VertebrateMitochondrial);
        options.include_stop_codon = true;
        let t = Translator::new(options);
        assert_eq!(t.translate_feature("ATGCGAAGA").unwrap(), "MR*");
        assert_eq!(t.translate_feature("ATGCGAAGAT").unwrap(), "MR*");
        assert_eq!(t.translate_feature("ATGCGA").unwrap(), "MR");
    }

    #[test]
    fn test_translate_feature_stop_after_whitespace() {
        let mut options = TranslationOptions::new(GeneticCodeTable::Standard);
        options.include_stop_codon = true;
        let t = Translator::new(options);
        assert_eq!(t.translate_feature("ATGAAA TAA").unwrap(), "MK*");
        assert_eq!(t.translate_feature("atgaaa\ntaa\n").unwrap(), "MK*");
    }

    #[test]
    fn test_orfs_all_frames() {
        let t = translator(GeneticCodeTable::Standard);
        assert_eq!(
            t.find_open_reading_frames("ATGAAATAGGATGCCC", false)
                .unwrap(),
            vec!["MK".to_string(), "MP".to_string()]
        );
        assert!(t.find_open_reading_frames("CCCCCC", false).unwrap().is_empty());
        assert!(t.find_open_reading_frames("", false).unwrap().is_empty());
    }

    #[test]
    fn test_orfs_invalid_sequence() {
        let t = translator(GeneticCodeTable::Standard);
        assert!(t.find_open_reading_frames("ATGN", false).is_err());
    }
}

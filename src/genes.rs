//! Genes: exon-structured features grouped by name, and the [`GeneList`].
//!
//! Gene-producing extractors (BED12, GTF, PSL, GdpGene) append one
//! [`GeneRow`] per data line. [`GeneList::from_rows()`] then groups
//! *consecutive* rows sharing a name into one [`Gene`]. Since grouping is by
//! contiguous runs, a name reappearing later in a file starts a new gene.

use std::io::Write;

use crate::chromosomes::ChromosomeRegistry;
use crate::columns::ChromosomeColumns;
use crate::error::GenPlayError;
use crate::io::tsv::{comma_list, TsvSerialize};
use crate::ranges::Strand;
use crate::Position;

/// One gene-producing data line: a named feature with one or more exons.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneRow {
    pub name: String,
    pub strand: Option<Strand>,
    pub exon_starts: Vec<Position>,
    pub exon_stops: Vec<Position>,
    /// `None` if the line carried no exon scores.
    pub exon_scores: Option<Vec<f64>>,
}

impl GeneRow {
    /// A single-exon row.
    pub fn single(
        name: impl Into<String>,
        strand: Option<Strand>,
        start: Position,
        stop: Position,
        score: Option<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            strand,
            exon_starts: vec![start],
            exon_stops: vec![stop],
            exon_scores: score.map(|score| vec![score]),
        }
    }
}

/// The gene rows of one extraction, per chromosome.
#[derive(Clone, Debug)]
pub struct GeneRows {
    pub rows: ChromosomeColumns<GeneRow>,
    /// The `searchURL=` header value, if the file had one.
    pub search_url: Option<String>,
    /// If set, genes whose exon scores are all exactly zero get no scores.
    pub null_scores_if_all_zero: bool,
}

impl GeneRows {
    pub fn new(chromosome_count: usize) -> Self {
        Self {
            rows: ChromosomeColumns::new(chromosome_count),
            search_url: None,
            null_scores_if_all_zero: false,
        }
    }

    pub fn push(&mut self, index: usize, row: GeneRow) {
        self.rows.push(index, row)
    }

    pub fn size(&self, index: usize) -> usize {
        self.rows.size(index)
    }

    pub fn chromosome_count(&self) -> usize {
        self.rows.chromosome_count()
    }
}

/// A gene with its exons sorted by start.
#[derive(Clone, Debug, PartialEq)]
pub struct Gene {
    pub name: String,
    pub chromosome: usize,
    pub strand: Option<Strand>,
    pub start: Position,
    pub stop: Position,
    pub exon_starts: Vec<Position>,
    pub exon_stops: Vec<Position>,
    pub exon_scores: Option<Vec<f64>>,
}

impl Gene {
    pub fn exon_count(&self) -> usize {
        self.exon_starts.len()
    }

    /// The mean exon score, if the gene has scores.
    pub fn mean_exon_score(&self) -> Option<f64> {
        let scores = self.exon_scores.as_ref()?;
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

/// Exons of a gene being assembled.
struct GeneBuilder {
    name: String,
    strand: Option<Strand>,
    exons: Vec<(Position, Position, Option<f64>)>,
    has_scores: bool,
}

impl GeneBuilder {
    fn new(row: GeneRow) -> Self {
        let mut builder = Self {
            name: row.name.clone(),
            strand: row.strand,
            exons: Vec::new(),
            has_scores: false,
        };
        builder.add(row);
        builder
    }

    fn add(&mut self, row: GeneRow) {
        let scores = row.exon_scores;
        self.has_scores |= scores.is_some();
        for (i, (start, stop)) in row.exon_starts.into_iter().zip(row.exon_stops).enumerate() {
            let score = scores.as_ref().and_then(|scores| scores.get(i).copied());
            self.exons.push((start, stop, score));
        }
    }

    fn build(mut self, chromosome: usize, null_scores_if_all_zero: bool) -> Gene {
        // stable, so exons with equal starts keep their row order
        self.exons.sort_by_key(|exon| exon.0);
        let start = self.exons.iter().map(|exon| exon.0).min().unwrap_or(0);
        let stop = self.exons.iter().map(|exon| exon.1).max().unwrap_or(start);
        let mut exon_scores = if self.has_scores {
            Some(
                self.exons
                    .iter()
                    .map(|exon| exon.2.unwrap_or(0.0))
                    .collect::<Vec<_>>(),
            )
        } else {
            None
        };
        if null_scores_if_all_zero
            && exon_scores
                .as_ref()
                .map_or(false, |scores| scores.iter().all(|&score| score == 0.0))
        {
            exon_scores = None;
        }
        Gene {
            name: self.name,
            chromosome,
            strand: self.strand,
            start,
            stop,
            exon_starts: self.exons.iter().map(|exon| exon.0).collect(),
            exon_stops: self.exons.iter().map(|exon| exon.1).collect(),
            exon_scores,
        }
    }
}

/// Group consecutive rows sharing a name into genes.
pub fn group_genes(
    rows: impl IntoIterator<Item = GeneRow>,
    chromosome: usize,
    null_scores_if_all_zero: bool,
) -> Vec<Gene> {
    let mut genes = Vec::new();
    let mut current: Option<GeneBuilder> = None;
    for row in rows {
        match current.as_mut() {
            Some(builder) if builder.name == row.name => builder.add(row),
            _ => {
                if let Some(builder) = current.replace(GeneBuilder::new(row)) {
                    genes.push(builder.build(chromosome, null_scores_if_all_zero));
                }
            }
        }
    }
    if let Some(builder) = current {
        genes.push(builder.build(chromosome, null_scores_if_all_zero));
    }
    genes
}

/// Genes per chromosome, in file order.
#[derive(Clone, Debug)]
pub struct GeneList {
    genes: ChromosomeColumns<Gene>,
    search_url: Option<String>,
}

impl GeneList {
    pub fn from_rows(rows: GeneRows) -> Self {
        let null_scores = rows.null_scores_if_all_zero;
        let columns = rows
            .rows
            .into_inner()
            .into_iter()
            .enumerate()
            .map(|(index, rows)| group_genes(rows, index, null_scores))
            .collect();
        let list = Self {
            genes: ChromosomeColumns::from_vecs(columns),
            search_url: rows.search_url,
        };
        log::debug!("grouped {} genes", list.len());
        list
    }

    /// Gene `position` of chromosome `index`.
    pub fn get(&self, index: usize, position: usize) -> Option<&Gene> {
        self.genes.get_value(index, position)
    }

    /// The number of genes of chromosome `index`.
    pub fn size(&self, index: usize) -> usize {
        self.genes.size(index)
    }

    pub fn genes(&self, index: usize) -> &[Gene] {
        self.genes.get(index).unwrap_or(&[])
    }

    pub fn search_url(&self) -> Option<&str> {
        self.search_url.as_deref()
    }

    pub fn chromosome_count(&self) -> usize {
        self.genes.chromosome_count()
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Gene> {
        self.genes.iter().flat_map(|(_, genes)| genes.iter())
    }
}

impl TsvSerialize for GeneList {
    /// Write genes as BED12, with exon scores as a 13th column when present.
    fn write_tsv(
        &self,
        registry: &ChromosomeRegistry,
        writer: &mut dyn Write,
    ) -> Result<(), GenPlayError> {
        if let Some(url) = &self.search_url {
            writeln!(writer, "searchURL=\"{}\"", url)?;
        }
        for gene in self.iter() {
            let chromosome = registry.get(gene.chromosome)?;
            let score = gene
                .mean_exon_score()
                .map_or(".".to_string(), |score| score.to_string());
            let strand = gene.strand.map_or('.', |strand| strand.as_char());
            let sizes: Vec<Position> = gene
                .exon_starts
                .iter()
                .zip(&gene.exon_stops)
                .map(|(start, stop)| stop.saturating_sub(*start))
                .collect();
            let relative_starts: Vec<Position> = gene
                .exon_starts
                .iter()
                .map(|start| start.saturating_sub(gene.start))
                .collect();
            write!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t0\t{}\t{}\t{}",
                chromosome.name,
                gene.start,
                gene.stop,
                gene.name,
                score,
                strand,
                gene.start,
                gene.stop,
                gene.exon_count(),
                comma_list(&sizes),
                comma_list(&relative_starts),
            )?;
            if let Some(scores) = &gene.exon_scores {
                write!(writer, "\t{}", comma_list(scores))?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, start: Position, stop: Position, score: Option<f64>) -> GeneRow {
        GeneRow::single(name, Some(Strand::Forward), start, stop, score)
    }

    #[test]
    fn test_group_contiguous_runs() {
        let rows = vec![
            row("A", 0, 10, None),
            row("A", 20, 30, None),
            row("B", 40, 50, None),
            row("B", 60, 70, None),
            row("B", 80, 90, None),
            row("A", 100, 110, None),
        ];
        let genes = group_genes(rows, 0, false);
        let summary: Vec<(&str, usize)> = genes
            .iter()
            .map(|gene| (gene.name.as_str(), gene.exon_count()))
            .collect();
        assert_eq!(summary, vec![("A", 2), ("B", 3), ("A", 1)]);
    }

    #[test]
    fn test_exons_sorted_and_bounds() {
        let rows = vec![row("G", 50, 60, Some(2.0)), row("G", 10, 20, Some(1.0))];
        let genes = group_genes(rows, 3, false);
        assert_eq!(genes.len(), 1);
        let gene = &genes[0];
        assert_eq!(gene.chromosome, 3);
        assert_eq!(gene.exon_starts, vec![10, 50]);
        assert_eq!(gene.exon_stops, vec![20, 60]);
        assert_eq!(gene.exon_scores, Some(vec![1.0, 2.0]));
        assert_eq!((gene.start, gene.stop), (10, 60));
    }

    #[test]
    fn test_no_scores() {
        let genes = group_genes(vec![row("G", 0, 10, None)], 0, false);
        assert_eq!(genes[0].exon_scores, None);
        assert_eq!(genes[0].mean_exon_score(), None);
    }

    #[test]
    fn test_all_zero_scores_nulled() {
        let rows = vec![row("G", 0, 10, Some(0.0)), row("G", 20, 30, Some(0.0))];
        assert_eq!(group_genes(rows.clone(), 0, true)[0].exon_scores, None);
        assert_eq!(
            group_genes(rows, 0, false)[0].exon_scores,
            Some(vec![0.0, 0.0])
        );
    }

    #[test]
    fn test_missing_scores_filled_with_zero() {
        let rows = vec![row("G", 0, 10, Some(4.0)), row("G", 20, 30, None)];
        let genes = group_genes(rows, 0, true);
        assert_eq!(genes[0].exon_scores, Some(vec![4.0, 0.0]));
    }

    #[test]
    fn test_gene_list_bed12() {
        let registry = crate::registry! { "chr1" => 1000 };
        let mut rows = GeneRows::new(1);
        rows.push(0, row("G", 100, 105, Some(1.0)));
        rows.push(0, row("G", 150, 155, Some(3.0)));
        let list = GeneList::from_rows(rows);
        assert_eq!(list.size(0), 1);
        assert_eq!(list.get(0, 0).unwrap().name, "G");
        assert!(list.get(0, 1).is_none());

        let mut buffer = Vec::new();
        list.write_tsv(&registry, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "chr1\t100\t155\tG\t2\t+\t100\t155\t0\t2\t5,5\t0,50\t1,3\n"
        );
    }
}

/*
 * MIT License
 *
 * Copyright (c) 2022 Joseph Sacchini
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use std::iter::FusedIterator;
use std::ops::Range;

///
/// Keeps the K highest scoring elements of an iterator without allocating, then yields them from
/// highest to lowest score.
///
/// Elements with equal scores keep the order they arrived in, so feeding an alphabetical
/// iterator gives an alphabetical tie-break for free.
///
pub struct TopK<E, const K: usize> {
    items: [Option<E>; K],
    alive: Range<usize>,
}

impl<Element, const K: usize> TopK<Element, K> {
    pub fn new<Itr, Score, ScoringFunc>(iter: Itr, f: ScoringFunc) -> Self
    where
        Itr: Iterator<Item = Element>,
        ScoringFunc: Fn(&Element) -> Score,
        Score: PartialOrd<Score>,
        [Option<Element>; K]: Default,
        [Option<Score>; K]: Default,
    {
        // scores[x] is f(&items[x]) whenever both are Some, and both arrays stay sorted from
        // greatest -> least score
        let mut items: [Option<Element>; K] = Default::default();
        let mut scores: [Option<Score>; K] = Default::default();
        let mut size = 0;

        for next in iter {
            let score = f(&next);

            // the first slot that is empty, or holds a strictly smaller score, is where this
            // element belongs. Strictly smaller is what keeps equal scores in arrival order.
            let slot = scores.iter().position(|other| match other {
                Some(other) => other < &score,
                None => true,
            });

            if let Some(i) = slot {
                array_insert(&mut scores, Some(score), i);
                array_insert(&mut items, Some(next), i);
                if size < K {
                    size += 1;
                }
            }
        }

        Self {
            items,
            alive: 0..size,
        }
    }
}

impl<Element, const K: usize> Iterator for TopK<Element, K> {
    type Item = Element;

    fn next(&mut self) -> Option<Self::Item> {
        self.alive.next().and_then(|idx| self.items[idx].take())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.alive.len();
        (remaining, Some(remaining))
    }
}

impl<Element, const K: usize> ExactSizeIterator for TopK<Element, K> {}
impl<Element, const K: usize> FusedIterator for TopK<Element, K> {}

/// Inserts tmp at idx, shifting everything after it one slot right (the last element falls off)
#[inline]
fn array_insert<E, const N: usize>(elems: &mut [E; N], mut tmp: E, idx: usize) {
    for slot in elems[idx..].iter_mut() {
        std::mem::swap(&mut tmp, slot);
    }
}

pub trait TopKExt: Iterator + Sized {
    fn top_k<Score, ScoreFn, const N: usize>(self, score_f: ScoreFn) -> TopK<Self::Item, N>
    where
        ScoreFn: Fn(&Self::Item) -> Score,
        Score: PartialOrd<Score>,
        [Option<Self::Item>; N]: Default,
        [Option<Score>; N]: Default,
    {
        TopK::new(self, score_f)
    }
}

impl<I> TopKExt for I where I: Iterator + Sized {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_highest_scores_in_order() {
        let top: Vec<u32> = [5u32, 1, 9, 3, 7, 2].iter().copied().top_k::<_, _, 3>(|v| *v).collect();
        assert_eq!(top, vec![9, 7, 5]);
    }

    #[test]
    fn test_fewer_items_than_k() {
        let top = ["b", "a"].iter().copied().top_k::<_, _, 5>(|v| v.len());
        assert_eq!(top.len(), 2);
        assert_eq!(top.collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_ties_keep_arrival_order() {
        let input = [('A', 1), ('B', 3), ('C', 1), ('D', 3), ('E', 1)];
        let top: Vec<(char, u32)> = input.iter().copied().top_k::<_, _, 4>(|(_, n)| *n).collect();
        assert_eq!(top, vec![('B', 3), ('D', 3), ('A', 1), ('C', 1)]);
    }
}

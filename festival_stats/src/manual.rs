/*!

This is the long-form manual for `festival_stats` and `festdash`.

## Input format

The input is a spreadsheet (`xlsx`, `xlsm`, `xlsb`, `xls` or `ods`) with one worksheet
laid out as in the yearly regional festival plan published by the local governments:

```text
row 1..3   title, date, notes (ignored)
row 4      |  (label) | 서울 | 부산 | ... | 제주 | 합계 |
row 5      |  (label) |  97  |  53  | ... |  31  | 1170 |
```

* The first column holds row labels and is ignored.
* The last used column is a precomputed total and is ignored.
* Region names are trimmed. Empty region cells are skipped together with their count.
* Counts that are not numbers (empty cells, text like `-`) count as zero.

The default worksheet name is `총괄`.

## Metrics

All the metrics apply to the regions currently selected.

### Total festivals

The sum of the counts.

### Most / fewest festivals

The region with the highest (lowest) count. When several regions share the same count,
the one that comes first in the worksheet is shown.

### Capital area share

The capital area is Seoul (`서울`), Gyeonggi (`경기`) and Incheon (`인천`). The English names
are also recognized. The capital share is the sum of these regions divided by the total.
The non-capital share is the rest. Both are zero when the total is zero.

### Ranking and Top-N

Regions sorted by decreasing count. Regions with the same count keep the worksheet order.
The Top-N view shows between 5 and 10 regions, never more than the number of selected regions.

### Share per region

The count of the region divided by the total, as a percentage rounded to one decimal.

*/
